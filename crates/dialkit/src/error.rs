use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("invalid hex color '{0}'")]
pub struct ColorError(pub String);

/// Rejected dial configuration. `index` is the dial's position in the registry.
#[derive(Debug, Error, PartialEq)]
pub enum DialError {
    #[error("dial {index}: {field} must be a finite number")]
    NotFinite { index: usize, field: &'static str },
    #[error("dial {index}: radius must be positive, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },
    #[error("dial {index}: max ({max}) must be greater than min ({min})")]
    EmptyRange { index: usize, min: f64, max: f64 },
    #[error("dial {index}: step must be positive, got {step}")]
    InvalidStep { index: usize, step: f64 },
    #[error("dial {index}: initial value {value} is outside [{min}, {max}]")]
    InitialOutOfRange {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error(
        "ring with circumference {circumference} cannot fit a single fraction of length {fraction_length}"
    )]
    DegenerateRing {
        circumference: f64,
        fraction_length: f64,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum WidgetError {
    #[error(transparent)]
    Dial(#[from] DialError),
    #[error("widget size must be positive, got {0}")]
    InvalidSize(f64),
    #[error("arc fraction length must be positive, got {0}")]
    InvalidFractionLength(f64),
    #[error("arc fraction density must be within (0, 1], got {0}")]
    InvalidFractionDensity(f64),
}

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("scene has not been built yet")]
    NotBuilt,
    #[error("no ring for dial {0}")]
    UnknownDial(usize),
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}
