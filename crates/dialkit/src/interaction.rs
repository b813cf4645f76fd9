use crate::geometry::{
    FULL_SWEEP_DEGREES, Point, degrees_to_radians, describe_arc, radians_to_degrees,
};
use crate::layout::{ArcKind, DashPattern, calculate_handle_center, draw_arc_trajectory};
use crate::registry::{Dial, DialRegistry};
use crate::render::{Appearance, LegendEntry, RenderUpdate, RingScene, Scene};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Keeps a live active arc strictly short of a full turn, which `describe_arc` would
/// otherwise close into a ring.
pub const ANGLE_DAMPING: f64 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    Dragging(usize),
}

impl Session {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn target(&self) -> Option<usize> {
        match self {
            Self::Dragging(index) => Some(*index),
            Self::Idle => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialState {
    /// Radians, in the ring's frame.
    pub angle: f64,
    /// Degrees swept by the active arc. Equals 360 only for a dial initialized at `max`.
    pub sweep: f64,
    pub value: f64,
}

impl DialState {
    fn initial(dial: &Dial) -> Self {
        let sweep = dial.initial_angle_degrees();
        Self {
            // a dial at `max` sweeps 360° but its handle angle wraps to 0
            angle: degrees_to_radians(sweep.rem_euclid(FULL_SWEEP_DEGREES)),
            sweep,
            value: dial.initial_value,
        }
    }
}

/// Pointer angle around `center`, in `[0, 2π)`, growing clockwise from 12 o'clock.
///
/// `atan2` cuts the circle at 9 o'clock. Shifting by a quarter turn (and a full turn for
/// the upper-left quadrant) moves the cut to 12 o'clock, where the arc starts anyway.
pub fn calculate_mouse_angle(center: Point, pointer: Point) -> f64 {
    let offset = pointer.relative_to(center);
    let angle = offset.y.atan2(offset.x);
    let shifted = if angle > -PI && angle < -FRAC_PI_2 {
        angle + 2.5 * PI
    } else {
        angle + 0.5 * PI
    };
    // atan2 may return exactly -π, which lands below zero
    shifted.rem_euclid(TAU)
}

/// Concentric dials sharing one center, driven by a single pointer.
pub struct DialWidget {
    registry: DialRegistry,
    appearance: Appearance,
    center: Point,
    states: Vec<DialState>,
    session: Session,
}

impl DialWidget {
    pub fn new(registry: DialRegistry, appearance: Appearance) -> Self {
        let center = Point::new(appearance.size / 2.0, appearance.size / 2.0);
        let states = registry.iter().map(DialState::initial).collect();
        Self {
            registry,
            appearance,
            center,
            states,
            session: Session::Idle,
        }
    }

    pub fn registry(&self) -> &DialRegistry {
        &self.registry
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn state(&self, index: usize) -> Option<&DialState> {
        self.states.get(index)
    }

    pub fn current_value(&self, index: usize) -> Option<f64> {
        self.state(index).map(|s| s.value)
    }

    pub fn current_angle(&self, index: usize) -> Option<f64> {
        self.state(index).map(|s| s.angle)
    }

    /// Starts a drag on the ring nearest to `pointer` and moves its handle there.
    ///
    /// Only one pointer is tracked: a press while a drag is running is ignored until the
    /// matching [`pointer_up`](Self::pointer_up).
    pub fn pointer_down(&mut self, pointer: Point) -> Option<RenderUpdate> {
        if let Session::Dragging(index) = self.session {
            log::trace!("Pointer down ignored, dial {} is being dragged", index);
            return None;
        }

        let Some(index) = self.find_closest_dial(pointer) else {
            log::trace!("Pointer down ignored, no dials configured");
            return None;
        };

        log::debug!("Dragging dial {} from {}", index, pointer);
        self.session = Session::Dragging(index);
        self.transform_active_dial(index, pointer)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<RenderUpdate> {
        match self.session {
            Session::Dragging(index) => self.transform_active_dial(index, pointer),
            Session::Idle => {
                log::trace!("Pointer move ignored, no active drag");
                None
            }
        }
    }

    /// Ends the drag. Returns `false` when there was none.
    pub fn pointer_up(&mut self) -> bool {
        match self.session {
            Session::Dragging(index) => {
                log::debug!("Released dial {}", index);
                self.session = Session::Idle;
                true
            }
            Session::Idle => false,
        }
    }

    /// Nearest ring by radial distance, no cutoff. Ties go to the dial configured first.
    pub fn find_closest_dial(&self, pointer: Point) -> Option<usize> {
        let distance = self.center.distance_to(pointer);

        self.registry
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (distance - a.radius)
                    .abs()
                    .total_cmp(&(distance - b.radius).abs())
            })
            .map(|(index, _)| index)
    }

    pub fn calculate_mouse_angle(&self, pointer: Point) -> f64 {
        calculate_mouse_angle(self.center, pointer)
    }

    fn transform_active_dial(&mut self, index: usize, pointer: Point) -> Option<RenderUpdate> {
        let dial = self.registry.get(index)?;
        let state = self.states.get_mut(index)?;

        let angle = calculate_mouse_angle(self.center, pointer) * ANGLE_DAMPING;
        let sweep = radians_to_degrees(angle);
        let value = dial.snap(angle);

        *state = DialState {
            angle,
            sweep,
            value,
        };

        Some(RenderUpdate {
            dial: index,
            active_path: describe_arc(self.center.x, self.center.y, dial.radius, 0.0, sweep),
            handle: calculate_handle_center(self.center, angle, dial.radius),
            value,
            legend_text: self.appearance.format.format(value),
        })
    }

    /// Full description of the current state, for adapters building from scratch.
    pub fn scene(&self) -> Scene {
        let arc = &self.appearance.arc;

        let rings = self
            .registry
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(index, (dial, state))| {
                let dash = DashPattern::for_ring(
                    dial.circumference(),
                    arc.fraction_length,
                    arc.fraction_density,
                );
                RingScene {
                    dial: index,
                    radius: dial.radius,
                    background: draw_arc_trajectory(
                        arc.background_color,
                        self.center,
                        dial.radius,
                        360.0,
                        dash,
                        ArcKind::Background,
                    ),
                    active: draw_arc_trajectory(
                        dial.color,
                        self.center,
                        dial.radius,
                        state.sweep,
                        dash,
                        ArcKind::Active,
                    ),
                    handle: calculate_handle_center(self.center, state.angle, dial.radius),
                }
            })
            .collect();

        let legend = self
            .registry
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(index, (dial, state))| LegendEntry {
                dial: index,
                color: dial.color,
                name: dial.display_name.clone(),
                text: self.appearance.format.format(state.value),
            })
            .collect();

        Scene {
            container: self.appearance.container.clone(),
            size: self.appearance.size,
            center: self.center,
            thickness: self.appearance.arc.thickness,
            handle_style: self.appearance.handle.clone(),
            heading: self.appearance.legend_heading.clone(),
            rings,
            legend,
        }
    }
}
