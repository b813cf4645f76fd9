//! Geometry and interaction engine for concentric dial sliders.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod macros;
pub mod registry;
pub mod render;
pub mod svg;

pub use color::Color;
pub use config::WidgetConfig;
pub use geometry::Point;
pub use interaction::{DialWidget, Session};
pub use registry::{Dial, DialConfig, DialRegistry};
pub use render::{RenderAdapter, RenderUpdate, Scene};
pub use svg::SvgRenderer;
