use crate::error::SvgError;
use crate::layout::ArcTrajectory;
use crate::render::{RenderAdapter, RenderUpdate, Scene};
use std::fmt::Write;

/// Renders a scene into a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    scene: Option<Scene>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn to_svg(&self) -> Result<String, SvgError> {
        let scene = self.scene.as_ref().ok_or(SvgError::NotBuilt)?;
        let mut out = String::new();

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}">"#,
            scene.container.id(),
            scene.size,
            scene.size
        )?;

        for ring in &scene.rings {
            writeln!(
                out,
                r#"  <g class="sliderSingle" data-slider="{}" transform="rotate(-90,{},{})" rad="{}">"#,
                ring.dial, scene.center.x, scene.center.y, ring.radius
            )?;
            write_arc(&mut out, &ring.background, scene.thickness)?;
            write_arc(&mut out, &ring.active, scene.thickness)?;
            writeln!(
                out,
                r#"    <circle class="sliderHandle" cx="{}" cy="{}" r="{}" stroke="{}" stroke-width="{}" fill="{}"/>"#,
                ring.handle.x,
                ring.handle.y,
                scene.handle_radius(),
                scene.handle_style.stroke,
                scene.handle_style.stroke_width,
                scene.handle_style.fill
            )?;
            writeln!(out, "  </g>")?;
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }

    /// Legend as plain text, heading first when configured.
    pub fn legend_lines(&self) -> Result<Vec<String>, SvgError> {
        let scene = self.scene.as_ref().ok_or(SvgError::NotBuilt)?;
        Ok(scene
            .heading
            .iter()
            .cloned()
            .chain(scene.legend.iter().map(|entry| entry.line()))
            .collect())
    }
}

fn write_arc(out: &mut String, arc: &ArcTrajectory, thickness: f64) -> Result<(), SvgError> {
    writeln!(
        out,
        r#"    <path class="{}" d="{}" stroke="{}" stroke-width="{}" fill="none" stroke-dasharray="{}"/>"#,
        arc.kind,
        arc.path,
        arc.color,
        thickness,
        arc.dash.dasharray()
    )?;
    Ok(())
}

impl RenderAdapter for SvgRenderer {
    type Error = SvgError;

    fn build(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        self.scene = Some(scene.clone());
        Ok(())
    }

    fn apply(&mut self, update: &RenderUpdate) -> Result<(), Self::Error> {
        let scene = self.scene.as_mut().ok_or(SvgError::NotBuilt)?;
        if scene.apply(update) {
            Ok(())
        } else {
            Err(SvgError::UnknownDial(update.dial))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::interaction::DialWidget;
    use crate::registry::{DialConfig, DialRegistry};
    use crate::render::Appearance;

    fn widget() -> DialWidget {
        let registry = DialRegistry::from_configs(&[
            DialConfig::new().radius(40.0).display_name("Transportation"),
            DialConfig::new()
                .radius(90.0)
                .initial_value(500.0)
                .display_name("Food"),
        ])
        .unwrap();
        let appearance = Appearance {
            legend_heading: Some("Adjust dial to enter expenses".to_string()),
            ..Appearance::default()
        };
        DialWidget::new(registry, appearance)
    }

    #[test]
    fn test_apply_before_build_fails() {
        let mut widget = widget();
        let mut renderer = SvgRenderer::new();
        let update = widget.pointer_down(Point::new(225.0, 135.0)).unwrap();

        assert!(matches!(renderer.apply(&update), Err(SvgError::NotBuilt)));
        assert!(matches!(renderer.to_svg(), Err(SvgError::NotBuilt)));
    }

    #[test]
    fn test_document_structure() {
        let widget = widget();
        let mut renderer = SvgRenderer::new();
        renderer.build(&widget.scene()).unwrap();

        let svg = renderer.to_svg().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"id="slider""#));
        assert_eq!(svg.matches(r#"class="sliderSingle""#).count(), 2);
        assert_eq!(svg.matches(r#"class="sliderSinglePath""#).count(), 2);
        assert_eq!(svg.matches(r#"class="sliderSinglePathActive""#).count(), 2);
        assert!(svg.contains(r#"transform="rotate(-90,225,225)""#));
        assert!(svg.contains(r##"stroke="#D8D8D8""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_updates_reach_document_and_legend() {
        let mut widget = widget();
        let mut renderer = SvgRenderer::new();
        renderer.build(&widget.scene()).unwrap();

        assert_eq!(
            renderer.legend_lines().unwrap(),
            vec![
                "Adjust dial to enter expenses".to_string(),
                "Transportation: 0".to_string(),
                "Food: 500".to_string(),
            ]
        );

        // 3 o'clock on the outer ring
        let update = widget.pointer_down(Point::new(315.0, 225.0)).unwrap();
        renderer.apply(&update).unwrap();

        assert!(renderer.to_svg().unwrap().contains(&update.active_path.to_string()));
        assert_eq!(renderer.legend_lines().unwrap()[2], "Food: 250");
    }

    #[test]
    fn test_unknown_dial_rejected() {
        let mut widget = widget();
        let mut renderer = SvgRenderer::new();
        renderer.build(&widget.scene()).unwrap();

        let mut update = widget.pointer_down(Point::new(315.0, 225.0)).unwrap();
        update.dial = 7;
        assert!(matches!(
            renderer.apply(&update),
            Err(SvgError::UnknownDial(7))
        ));
    }
}
