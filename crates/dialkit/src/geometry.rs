//! Pure geometry helpers shared by the layout engine and the interaction state machine.
//!
//! Angles follow screen conventions: measured from the positive x-axis and growing
//! clockwise, since the y-axis points down.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FULL_SWEEP_DEGREES: f64 = 360.0;
const NUDGED_FULL_SWEEP_DEGREES: f64 = 359.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Translates this point into a frame whose origin sits at `origin`, e.g. a device
    /// coordinate into a drawing surface, or a pointer into its dial center's frame.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParsePointError {
    #[error("expected `x,y`, got '{0}'")]
    Format(String),
    #[error("invalid coordinate '{0}'")]
    Coordinate(String),
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePointError::Format(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ParsePointError::Coordinate(v.trim().to_string()))
        };
        Ok(Point::new(parse(x)?, parse(y)?))
    }
}

pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_degrees: f64) -> Point {
    let angle = degrees_to_radians(angle_degrees);
    Point::new(
        center_x + radius * angle.cos(),
        center_y + radius * angle.sin(),
    )
}

pub fn radians_to_degrees(angle: f64) -> f64 {
    angle / (PI / 180.0)
}

pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * PI / 180.0
}

/// An arc drawn from the point at `end_angle` back to the point at `start_angle`.
///
/// Keeps the structured values next to the SVG path data so that backends without a
/// path parser (cairo) can replay the same arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    /// Degrees.
    pub start_angle: f64,
    /// Degrees, after the full-circle nudge.
    pub end_angle: f64,
    pub from: Point,
    pub to: Point,
    pub large_arc: bool,
    pub closed: bool,
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 {} 0 {} {}",
            self.from.x,
            self.from.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            self.to.x,
            self.to.y
        )?;
        if self.closed {
            f.write_str(" z")?;
        }
        Ok(())
    }
}

/// Describes the arc between two angles (degrees) around `(x, y)`.
///
/// A sweep of exactly 360° would start and end on the same point, which the SVG arc
/// command draws as nothing. Such arcs stop at 359° and close the path instead.
pub fn describe_arc(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> ArcPath {
    let closed = end_angle - start_angle == FULL_SWEEP_DEGREES;
    let end_angle = if closed {
        start_angle + NUDGED_FULL_SWEEP_DEGREES
    } else {
        end_angle
    };

    ArcPath {
        center: Point::new(x, y),
        radius,
        start_angle,
        end_angle,
        from: polar_to_cartesian(x, y, radius, end_angle),
        to: polar_to_cartesian(x, y, radius, start_angle),
        large_arc: end_angle - start_angle > 180.0,
        closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(path: &str) -> Vec<f64> {
        path.split_whitespace()
            .filter_map(|token| token.parse::<f64>().ok())
            .collect()
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let right = polar_to_cartesian(100.0, 100.0, 50.0, 0.0);
        assert!((right.x - 150.0).abs() < 1e-9 && (right.y - 100.0).abs() < 1e-9);

        // clockwise on screen: 90° points down
        let down = polar_to_cartesian(100.0, 100.0, 50.0, 90.0);
        assert!((down.x - 100.0).abs() < 1e-9 && (down.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_describe_arc_endpoints_round_trip() {
        for end in 0..360 {
            let end = end as f64;
            let path = describe_arc(225.0, 225.0, 90.0, 0.0, end).to_string();
            let values = numbers(&path);
            // M x y A rx ry rotation large sweep x y
            let start = polar_to_cartesian(225.0, 225.0, 90.0, end);
            let finish = polar_to_cartesian(225.0, 225.0, 90.0, 0.0);
            assert_eq!((values[0], values[1]), (start.x, start.y), "end angle {end}");
            assert_eq!((values[7], values[8]), (finish.x, finish.y), "end angle {end}");
        }
    }

    #[test]
    fn test_describe_arc_large_arc_flag() {
        assert!(!describe_arc(0.0, 0.0, 10.0, 0.0, 180.0).large_arc);
        assert!(describe_arc(0.0, 0.0, 10.0, 0.0, 180.5).large_arc);
    }

    #[test]
    fn test_full_sweep_is_closed() {
        let full = describe_arc(225.0, 225.0, 50.0, 0.0, 360.0);
        assert!(full.closed);
        assert_eq!(full.end_angle, 359.0);
        assert!(full.to_string().ends_with(" z"));

        for end in [0.0, 90.0, 359.0, 359.9] {
            let open = describe_arc(225.0, 225.0, 50.0, 0.0, end);
            assert!(!open.closed);
            assert!(!open.to_string().ends_with('z'));
            assert_ne!(open.to_string(), full.to_string());
        }
    }

    #[test]
    fn test_radian_degree_conversion() {
        assert!((radians_to_degrees(PI) - 180.0).abs() < 1e-9);
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-12);
        // no wraparound
        assert!((radians_to_degrees(3.0 * PI) - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_parsing_and_translation() {
        assert_eq!("10, 20.5".parse::<Point>(), Ok(Point::new(10.0, 20.5)));
        assert!(matches!(
            "10".parse::<Point>(),
            Err(ParsePointError::Format(_))
        ));
        assert!(matches!(
            "a,1".parse::<Point>(),
            Err(ParsePointError::Coordinate(_))
        ));

        let local = Point::new(130.0, 80.0).relative_to(Point::new(100.0, 50.0));
        assert_eq!(local, Point::new(30.0, 30.0));
    }
}
