use crate::color::Color;
use crate::error::DialError;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub const DEFAULT_RADIUS: f64 = 50.0;
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 1000.0;
pub const DEFAULT_STEP: f64 = 50.0;
pub const DEFAULT_INITIAL_VALUE: f64 = 0.0;
pub const DEFAULT_DISPLAY_NAME: &str = "Unnamed value";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct DisplayName(String);

crate::impl_string_newtype!(DisplayName);

/// One dial as written in configuration. Every field is optional and defaulted on its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DialConfig {
    pub radius: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub initial_value: Option<f64>,
    pub color: Option<Color>,
    pub display_name: Option<DisplayName>,
}

impl DialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(DisplayName::new(name));
        self
    }

    /// Applies defaults and validates the dial sitting at `index`.
    pub fn resolve(&self, index: usize) -> Result<Dial, DialError> {
        let radius = self.radius.unwrap_or(DEFAULT_RADIUS);
        let min = self.min.unwrap_or(DEFAULT_MIN);
        let max = self.max.unwrap_or(DEFAULT_MAX);
        let step = self.step.unwrap_or(DEFAULT_STEP);
        let initial_value = self.initial_value.unwrap_or(DEFAULT_INITIAL_VALUE);

        for (field, value) in [
            ("radius", radius),
            ("min", min),
            ("max", max),
            ("step", step),
            ("initial_value", initial_value),
        ] {
            if !value.is_finite() {
                return Err(DialError::NotFinite { index, field });
            }
        }

        if radius <= 0.0 {
            return Err(DialError::InvalidRadius { index, radius });
        }
        if max <= min {
            return Err(DialError::EmptyRange { index, min, max });
        }
        if step <= 0.0 {
            return Err(DialError::InvalidStep { index, step });
        }
        if !(min..=max).contains(&initial_value) {
            return Err(DialError::InitialOutOfRange {
                index,
                value: initial_value,
                min,
                max,
            });
        }

        Ok(Dial {
            radius,
            min,
            max,
            step,
            initial_value,
            color: self.color.unwrap_or_else(Color::dial_default),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| DisplayName::new(DEFAULT_DISPLAY_NAME)),
        })
    }
}

/// A validated dial. Only constructed through [`DialConfig::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    pub radius: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial_value: f64,
    pub color: Color,
    pub display_name: DisplayName,
}

impl Dial {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn circumference(&self) -> f64 {
        self.radius * TAU
    }

    /// Whole degrees swept by the active arc before any interaction. A dial starting at
    /// `max` sweeps the full 360°.
    pub fn initial_angle_degrees(&self) -> f64 {
        ((self.initial_value - self.min) / self.range() * 360.0).floor()
    }

    /// Snaps an angle (radians, `[0, 2π)`) to the dial's stepping.
    pub fn snap(&self, angle: f64) -> f64 {
        let raw = angle / TAU * self.range();
        // a range that is not a multiple of `step` must not round past `max`
        let steps = (raw / self.step)
            .round()
            .clamp(0.0, (self.range() / self.step).floor());
        self.min + steps * self.step
    }
}

/// Ordered dials of one widget. A dial's identity is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialRegistry {
    dials: Vec<Dial>,
}

impl DialRegistry {
    pub fn new(dials: Vec<Dial>) -> Self {
        Self { dials }
    }

    pub fn from_configs(configs: &[DialConfig]) -> Result<Self, DialError> {
        configs
            .iter()
            .enumerate()
            .map(|(index, cfg)| cfg.resolve(index))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.dials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dials.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Dial> {
        self.dials.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dial> {
        self.dials.iter()
    }

    pub fn radii(&self) -> impl Iterator<Item = f64> + '_ {
        self.dials.iter().map(|d| d.radius)
    }

    pub fn initial_angle_degrees(&self, index: usize) -> Option<f64> {
        self.get(index).map(Dial::initial_angle_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_per_field() {
        let dial = DialConfig::new().radius(90.0).resolve(0).unwrap();

        assert_eq!(dial.radius, 90.0);
        assert_eq!((dial.min, dial.max, dial.step), (0.0, 1000.0, 50.0));
        assert_eq!(dial.initial_value, 0.0);
        assert_eq!(dial.color, Color::dial_default());
        assert_eq!(dial.display_name.as_str(), "Unnamed value");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let cases = vec![
            (
                DialConfig::new().range(10.0, 10.0),
                DialError::EmptyRange {
                    index: 2,
                    min: 10.0,
                    max: 10.0,
                },
            ),
            (
                DialConfig::new().step(0.0),
                DialError::InvalidStep {
                    index: 2,
                    step: 0.0,
                },
            ),
            (
                DialConfig::new().step(-5.0),
                DialError::InvalidStep {
                    index: 2,
                    step: -5.0,
                },
            ),
            (
                DialConfig::new().radius(0.0),
                DialError::InvalidRadius {
                    index: 2,
                    radius: 0.0,
                },
            ),
            (
                DialConfig::new().initial_value(1001.0),
                DialError::InitialOutOfRange {
                    index: 2,
                    value: 1001.0,
                    min: 0.0,
                    max: 1000.0,
                },
            ),
            (
                DialConfig::new().range(f64::NAN, 1.0),
                DialError::NotFinite {
                    index: 2,
                    field: "min",
                },
            ),
        ];

        for (cfg, expected) in cases {
            assert_eq!(cfg.resolve(2), Err(expected));
        }
    }

    #[test]
    fn test_initial_angle() {
        let half = DialConfig::new().initial_value(500.0).resolve(0).unwrap();
        assert_eq!(half.initial_angle_degrees(), 180.0);

        let full = DialConfig::new().initial_value(1000.0).resolve(0).unwrap();
        assert_eq!(full.initial_angle_degrees(), 360.0);

        // floored
        let seventh = DialConfig::new()
            .range(0.0, 7.0)
            .step(1.0)
            .initial_value(1.0)
            .resolve(0)
            .unwrap();
        assert_eq!(seventh.initial_angle_degrees(), 51.0);

        let offset = DialConfig::new()
            .range(100.0, 200.0)
            .step(10.0)
            .initial_value(150.0)
            .resolve(0)
            .unwrap();
        assert_eq!(offset.initial_angle_degrees(), 180.0);
    }

    #[test]
    fn test_snap_clamps_to_max() {
        let dial = DialConfig::new()
            .range(0.0, 100.0)
            .step(60.0)
            .resolve(0)
            .unwrap();

        assert_eq!(dial.snap(0.0), 0.0);
        assert_eq!(dial.snap(TAU * 0.4), 60.0);
        // 99.9 / 60 rounds to 2, which would be 120
        assert_eq!(dial.snap(TAU * 0.999), 60.0);
    }

    #[test]
    fn test_registry_from_configs() {
        let registry = DialRegistry::from_configs(&[
            DialConfig::new().radius(40.0),
            DialConfig::new().radius(90.0).initial_value(250.0),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.radii().collect::<Vec<_>>(), vec![40.0, 90.0]);
        assert_eq!(registry.initial_angle_degrees(1), Some(90.0));
        assert_eq!(registry.initial_angle_degrees(2), None);

        let err = DialRegistry::from_configs(&[
            DialConfig::new(),
            DialConfig::new().range(5.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, DialError::EmptyRange { index: 1, .. }));
    }

    #[test]
    fn test_dial_config_deserialization() {
        let cfg: DialConfig = serde_json::from_str(
            r##"{ "radius": 150, "step": 25, "color": "#2980b9", "display_name": "Food" }"##,
        )
        .unwrap();

        assert_eq!(cfg.radius, Some(150.0));
        assert_eq!(cfg.step, Some(25.0));
        assert_eq!(cfg.min, None);
        assert_eq!(cfg.color, Some(Color::from_rgb(0x29, 0x80, 0xB9)));
        assert_eq!(cfg.display_name, Some(DisplayName::new("Food")));
    }
}
