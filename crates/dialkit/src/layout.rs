//! Dashed ring layout: how many dash fractions fit on a ring, and the arcs drawn with them.

use crate::color::Color;
use crate::error::LayoutError;
use crate::geometry::{ArcPath, FULL_SWEEP_DEGREES, Point, describe_arc};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub length: f64,
    pub spacing: f64,
}

impl DashPattern {
    /// Used when a ring is too small to hold a single fraction.
    pub fn fallback(length: f64) -> Self {
        Self {
            length,
            spacing: length,
        }
    }

    pub fn for_ring(circumference: f64, fraction_length: f64, fraction_density: f64) -> Self {
        calculate_spacing_between_arc_fractions(circumference, fraction_length, fraction_density)
            .unwrap_or_else(|e| {
                log::warn!("{e}, using a spacing of {fraction_length}");
                Self::fallback(fraction_length)
            })
    }

    /// Value of the SVG `stroke-dasharray` attribute.
    pub fn dasharray(&self) -> String {
        format!("{} {}", self.length, self.spacing)
    }
}

/// Spreads `floor(circumference / fraction_length * fraction_density)` dashes evenly
/// around the ring.
pub fn calculate_spacing_between_arc_fractions(
    circumference: f64,
    fraction_length: f64,
    fraction_density: f64,
) -> Result<DashPattern, LayoutError> {
    let fractions = (circumference / fraction_length * fraction_density).floor();

    // also catches NaN from a zero fraction length
    if !fractions.is_finite() || fractions < 1.0 {
        return Err(LayoutError::DegenerateRing {
            circumference,
            fraction_length,
        });
    }

    let total_spacing = circumference - fractions * fraction_length;
    Ok(DashPattern {
        length: fraction_length,
        spacing: total_spacing / fractions,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum ArcKind {
    #[strum(serialize = "sliderSinglePath")]
    Background,
    #[strum(serialize = "sliderSinglePathActive")]
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcTrajectory {
    pub kind: ArcKind,
    pub color: Color,
    pub dash: DashPattern,
    pub path: ArcPath,
}

/// Builds the arc from 0° to `sweep` degrees. Background rings always span the full
/// circle; active arcs stop at the dial's current angle. Both share `dash` so the
/// foreground dashes sit on top of the background ones.
pub fn draw_arc_trajectory(
    color: Color,
    center: Point,
    radius: f64,
    sweep: f64,
    dash: DashPattern,
    kind: ArcKind,
) -> ArcTrajectory {
    let sweep = match kind {
        ArcKind::Background => FULL_SWEEP_DEGREES,
        ArcKind::Active => sweep,
    };

    ArcTrajectory {
        kind,
        color,
        dash,
        path: describe_arc(center.x, center.y, radius, 0.0, sweep),
    }
}

/// Handle position for `angle` (radians) in the ring's own frame, before the -90°
/// rotation that puts angle 0 at 12 o'clock.
pub fn calculate_handle_center(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}
