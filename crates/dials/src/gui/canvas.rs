use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface};
use dialkit::geometry::{ArcPath, degrees_to_radians};
use dialkit::layout::ArcTrajectory;
use dialkit::render::{HandleStyle, RenderAdapter, RenderUpdate, RingScene, Scene};
use dialkit::{Color, DialWidget};
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Canvas has no scene yet")]
    NotBuilt,
    #[error("No ring for dial {0}")]
    UnknownDial(usize),
}

/// Keeps the last scene and replays it onto a cairo context on every draw.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    scene: Option<Scene>,
}

impl CairoRenderer {
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(scene) = &self.scene else {
            return Ok(());
        };

        let (r, g, b, a) = colors.surface.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.paint()?;

        for ring in &scene.rings {
            RingRenderer::new(scene, ring).draw(cr)?;
        }
        Ok(())
    }
}

impl RenderAdapter for CairoRenderer {
    type Error = CanvasError;

    fn build(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        self.scene = Some(scene.clone());
        Ok(())
    }

    fn apply(&mut self, update: &RenderUpdate) -> Result<(), Self::Error> {
        let scene = self.scene.as_mut().ok_or(CanvasError::NotBuilt)?;
        if scene.apply(update) {
            Ok(())
        } else {
            Err(CanvasError::UnknownDial(update.dial))
        }
    }
}

struct RingRenderer<'a> {
    scene: &'a Scene,
    ring: &'a RingScene,
}

impl<'a> RingRenderer<'a> {
    fn new(scene: &'a Scene, ring: &'a RingScene) -> Self {
        Self { scene, ring }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.save()?;
        // angle 0 at 12 o'clock
        let center = self.scene.center;
        cr.translate(center.x, center.y);
        cr.rotate(-FRAC_PI_2);
        cr.translate(-center.x, -center.y);

        self.draw_arc(cr, &self.ring.background)?;
        self.draw_arc(cr, &self.ring.active)?;
        self.draw_handle(cr, &self.scene.handle_style)?;

        cr.restore()
    }

    fn draw_arc(&self, cr: &Context, arc: &ArcTrajectory) -> Result<(), cairo::Error> {
        set_source(cr, arc.color);
        cr.set_line_width(self.scene.thickness);
        cr.set_dash(&[arc.dash.length, arc.dash.spacing], 0.0);
        trace_arc(cr, &arc.path);
        cr.stroke()
    }

    fn draw_handle(&self, cr: &Context, style: &HandleStyle) -> Result<(), cairo::Error> {
        cr.set_dash(&[], 0.0);
        cr.new_path();
        cr.arc(
            self.ring.handle.x,
            self.ring.handle.y,
            self.scene.handle_radius(),
            0.0,
            2.0 * PI,
        );
        set_source(cr, style.fill);
        cr.fill_preserve()?;
        set_source(cr, style.stroke);
        cr.set_line_width(style.stroke_width);
        cr.stroke()
    }
}

/// Same walk as the SVG path data: from the end angle back to the start angle.
fn trace_arc(cr: &Context, path: &ArcPath) {
    cr.new_path();
    cr.move_to(path.from.x, path.from.y);
    cr.arc_negative(
        path.center.x,
        path.center.y,
        path.radius,
        degrees_to_radians(path.end_angle),
        degrees_to_radians(path.start_angle),
    );
    if path.closed {
        cr.close_path();
    }
}

fn set_source(cr: &Context, color: Color) {
    let (r, g, b, a) = color.to_srgba().into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Draws the widget's current state off-screen and writes it as PNG.
pub fn write_png(widget: &DialWidget, path: &Path) -> anyhow::Result<()> {
    let mut renderer = CairoRenderer::default();
    renderer.build(&widget.scene())?;

    let size = widget.appearance().size.ceil() as i32;
    let surface = ImageSurface::create(Format::ARgb32, size, size)?;
    let cr = Context::new(&surface)?;
    renderer.draw(&cr, &ThemeColors::default())?;
    drop(cr);

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
