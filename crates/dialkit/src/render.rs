//! The boundary between the dial engine and whatever draws it.
//!
//! The engine never touches a scene graph. It hands an adapter one [`Scene`] describing
//! the initial rings and legend, then a [`RenderUpdate`] per pointer tick.

use crate::color::Color;
use crate::geometry::{ArcPath, Point};
use crate::layout::ArcTrajectory;
use crate::registry::DisplayName;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTAINER: &str = "#slider";
pub const DEFAULT_SIZE: f64 = 450.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ContainerSelector(String);

crate::impl_string_newtype!(ContainerSelector);

impl ContainerSelector {
    /// The selector without its leading `#` or `.`, usable as an element id.
    pub fn id(&self) -> &str {
        self.0.trim_start_matches(['#', '.'])
    }
}

impl Default for ContainerSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArcStyle {
    pub fraction_length: f64,
    /// Share of the circumference covered by dashes, in `(0, 1]`.
    pub fraction_density: f64,
    pub thickness: f64,
    pub background_color: Color,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            fraction_length: 10.0,
            fraction_density: 0.9,
            thickness: 25.0,
            background_color: Color::background_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandleStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            fill: Color::handle_fill_default(),
            stroke: Color::handle_stroke_default(),
            stroke_width: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueFormat {
    pub prefix: String,
    pub decimals: Option<usize>,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self.decimals {
            Some(decimals) => format!("{}{:.*}", self.prefix, decimals, value),
            None => format!("{}{}", self.prefix, value),
        }
    }
}

/// Everything about a widget's look that is not a dial.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub container: ContainerSelector,
    pub size: f64,
    pub arc: ArcStyle,
    pub handle: HandleStyle,
    pub format: ValueFormat,
    pub legend_heading: Option<String>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            container: ContainerSelector::default(),
            size: DEFAULT_SIZE,
            arc: ArcStyle::default(),
            handle: HandleStyle::default(),
            format: ValueFormat::default(),
            legend_heading: None,
        }
    }
}

/// Delta produced by one pointer tick on dial `dial`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUpdate {
    pub dial: usize,
    pub active_path: ArcPath,
    pub handle: Point,
    pub value: f64,
    pub legend_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingScene {
    pub dial: usize,
    pub radius: f64,
    pub background: ArcTrajectory,
    pub active: ArcTrajectory,
    /// In the ring's frame, before the -90° rotation.
    pub handle: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub dial: usize,
    pub color: Color,
    pub name: DisplayName,
    pub text: String,
}

impl LegendEntry {
    pub fn line(&self) -> String {
        format!("{}: {}", self.name, self.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub container: ContainerSelector,
    pub size: f64,
    pub center: Point,
    pub thickness: f64,
    pub handle_style: HandleStyle,
    pub heading: Option<String>,
    pub rings: Vec<RingScene>,
    pub legend: Vec<LegendEntry>,
}

impl Scene {
    /// Applies an update in place. Returns `false` when the scene has no such dial.
    pub fn apply(&mut self, update: &RenderUpdate) -> bool {
        let Some(ring) = self.rings.iter_mut().find(|r| r.dial == update.dial) else {
            return false;
        };
        ring.active.path = update.active_path;
        ring.handle = update.handle;

        if let Some(entry) = self.legend.iter_mut().find(|e| e.dial == update.dial) {
            entry.text.clone_from(&update.legend_text);
        }
        true
    }

    pub fn ring(&self, dial: usize) -> Option<&RingScene> {
        self.rings.iter().find(|r| r.dial == dial)
    }

    pub fn handle_radius(&self) -> f64 {
        self.thickness / 2.0
    }
}

/// A rendering backend. `build` receives the initial scene once, `apply` every delta.
pub trait RenderAdapter {
    type Error;

    fn build(&mut self, scene: &Scene) -> Result<(), Self::Error>;

    fn apply(&mut self, update: &RenderUpdate) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_format() {
        let plain = ValueFormat::default();
        assert_eq!(plain.format(500.0), "500");
        assert_eq!(plain.format(-50.0), "-50");

        let currency = ValueFormat {
            prefix: "$".to_string(),
            decimals: None,
        };
        assert_eq!(currency.format(750.0), "$750");

        let fixed = ValueFormat {
            prefix: String::new(),
            decimals: Some(1),
        };
        assert_eq!(fixed.format(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_container_id() {
        assert_eq!(ContainerSelector::default().id(), "slider");
        assert_eq!(ContainerSelector::new(".dials").id(), "dials");
        assert_eq!(ContainerSelector::new("plain").id(), "plain");
    }

    #[test]
    fn test_styles_deserialize_with_defaults() {
        let arc: ArcStyle = serde_json::from_str(r#"{ "thickness": 12 }"#).unwrap();
        assert_eq!(arc.thickness, 12.0);
        assert_eq!(arc.fraction_length, 10.0);
        assert_eq!(arc.background_color, Color::background_default());

        let handle: HandleStyle = serde_json::from_str(r##"{ "fill": "#000" }"##).unwrap();
        assert_eq!(handle.fill, Color::from_rgb(0, 0, 0));
        assert_eq!(handle.stroke, Color::handle_stroke_default());
    }
}
