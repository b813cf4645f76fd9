use crate::error::{ConfigError, WidgetError};
use crate::interaction::DialWidget;
use crate::registry::{DialConfig, DialRegistry};
use crate::render::{
    Appearance, ArcStyle, ContainerSelector, DEFAULT_SIZE, HandleStyle, ValueFormat,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "DIALS";

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub container: ContainerSelector,
    pub size: f64,
    /// Prepended to every legend value, e.g. `$`.
    pub value_prefix: String,
    pub decimals: Option<usize>,
    pub legend_heading: Option<String>,
    pub arc: ArcStyle,
    pub handle: HandleStyle,
    pub dials: Vec<DialConfig>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            container: ContainerSelector::default(),
            size: DEFAULT_SIZE,
            value_prefix: String::new(),
            decimals: None,
            legend_heading: None,
            arc: ArcStyle::default(),
            handle: HandleStyle::default(),
            dials: Vec::new(),
        }
    }
}

impl WidgetConfig {
    pub fn appearance(&self) -> Appearance {
        Appearance {
            container: self.container.clone(),
            size: self.size,
            arc: self.arc.clone(),
            handle: self.handle.clone(),
            format: ValueFormat {
                prefix: self.value_prefix.clone(),
                decimals: self.decimals,
            },
            legend_heading: self.legend_heading.clone(),
        }
    }

    /// Validates the configuration and builds the widget it describes.
    pub fn build(&self) -> Result<DialWidget, WidgetError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(WidgetError::InvalidSize(self.size));
        }
        if !(self.arc.fraction_length.is_finite() && self.arc.fraction_length > 0.0) {
            return Err(WidgetError::InvalidFractionLength(
                self.arc.fraction_length,
            ));
        }
        if !(self.arc.fraction_density > 0.0 && self.arc.fraction_density <= 1.0) {
            return Err(WidgetError::InvalidFractionDensity(
                self.arc.fraction_density,
            ));
        }

        let registry = DialRegistry::from_configs(&self.dials)?;
        Ok(DialWidget::new(registry, self.appearance()))
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "dials", "dials").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Layers `DIALS_` environment overrides on top of `source`.
fn deserialize<S>(source: S, env: config::Environment) -> Result<WidgetConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(source)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user's config file. A missing file yields the plain defaults (no dials).
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    let config_path = get_config_path()?;
    deserialize(config::File::from(config_path).required(false), environment())
}

pub fn load_config_from(path: &Path) -> Result<WidgetConfig, ConfigError> {
    deserialize(config::File::from(path).required(true), environment())
}

/// The bundled demo configuration, with environment overrides applied.
pub fn default_config() -> WidgetConfig {
    default_config_with(environment())
}

fn default_config_with(env: config::Environment) -> WidgetConfig {
    let bundled = || config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml);

    deserialize(bundled(), env).unwrap_or_else(|e| {
        log::error!("Ignoring environment overrides: {}", e);
        config::Config::builder()
            .add_source(bundled())
            .build()
            .and_then(|s| s.try_deserialize())
            .unwrap_or_else(|e| {
                log::error!("Bundled config is invalid: {}", e);
                WidgetConfig::default()
            })
    })
}

pub fn load_or_default() -> WidgetConfig {
    load_or_default_with(get_config_path().ok(), environment())
}

/// The user file when it exists and parses, the bundled demo otherwise. Environment
/// overrides apply in both cases.
fn load_or_default_with(path: Option<PathBuf>, env: config::Environment) -> WidgetConfig {
    let Some(path) = path.filter(|p| p.exists()) else {
        return default_config_with(env);
    };

    match deserialize(config::File::from(path).required(true), env.clone()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            default_config_with(env)
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}
