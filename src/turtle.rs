//! Turtle state and operations for curve interpretation.

use crate::path::ColorIndex;
use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// The turtle faces its local X axis. Planar grammars only ever rotate about Z, so the
/// heading stays in the XY plane until a pitch or roll symbol is met.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the pen.
    pub position: DVec3,

    /// Current world-space orientation.
    pub rotation: DQuat,

    /// Distance covered by one forward step.
    pub step_length: f64,

    /// Active palette entry.
    pub pen_color_index: ColorIndex,

    /// `1.0` or `-1.0`; multiplies every rotation (flipped by `!`).
    pub turn_sign: f64,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            step_length: 1.0,
            pen_color_index: 0,
            turn_sign: 1.0,
        }
    }
}

impl TurtleState {
    /// A turtle at the origin facing `starting_angle` degrees counter-clockwise from +X.
    pub fn facing(starting_angle: f64, step_length: f64) -> Self {
        Self {
            rotation: initial_rotation(starting_angle),
            step_length,
            ..Default::default()
        }
    }

    /// Returns the turtle's local forward direction (X-axis) in world space.
    pub fn heading(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// Heading as `(yaw, pitch)` in degrees. Yaw is measured in the XY plane from +X.
    pub fn yaw_pitch(&self) -> (f64, f64) {
        let h = self.heading();
        let yaw = h.y.atan2(h.x).to_degrees();
        let pitch = h.z.clamp(-1.0, 1.0).asin().to_degrees();
        (yaw, pitch)
    }

    /// Where one forward step of `length` lands.
    pub fn ahead(&self, length: f64) -> DVec3 {
        self.position + self.heading() * length
    }

    /// Rotates the turtle around its local X axis by `angle` radians (Roll).
    pub fn rotate_local_x(&mut self, angle: f64) {
        self.rotation = (self.rotation * DQuat::from_axis_angle(DVec3::X, angle)).normalize();
    }

    /// Rotates the turtle around its local Y axis by `angle` radians (Pitch).
    pub fn rotate_local_y(&mut self, angle: f64) {
        self.rotation = (self.rotation * DQuat::from_axis_angle(DVec3::Y, angle)).normalize();
    }

    /// Rotates the turtle around its local Z axis by `angle` radians (Yaw).
    pub fn rotate_local_z(&mut self, angle: f64) {
        self.rotation = (self.rotation * DQuat::from_axis_angle(DVec3::Z, angle)).normalize();
    }
}

/// Orientation of a fresh turtle facing `starting_angle` degrees in the XY plane.
pub fn initial_rotation(starting_angle: f64) -> DQuat {
    DQuat::from_rotation_z(starting_angle.to_radians())
}

/// Operations that can be performed by the turtle.
///
/// Signed variants carry `1.0` or `-1.0`; the magnitude comes from the grammar or the
/// [`RenderConfig`](crate::RenderConfig).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    // --- Movement ---
    /// Step forward with the pen down (`F`).
    Draw,
    /// Step forward by `step × coefficient` with the pen down, step unchanged (`f`).
    DrawScaled,
    /// Step forward with the pen up (`U`).
    Move,
    /// Reset to the starting heading, then draw (`_`).
    DrawFromStart,
    /// Step along world Z with the pen down (`⇧`/`⇩`).
    Lift(f64),
    /// Draw forward and straight back (`|`).
    RoundTrip,

    // --- Rotation ---
    /// Rotate around local Z by the grammar angle (`+`/`-`).
    Yaw(f64),
    /// Rotate around local Z by the secondary angle (`>`/`<`).
    YawSecondary(f64),
    /// Rotate around local Y by the grammar angle (`P`/`M`).
    Pitch(f64),
    /// Rotate around the heading axis by the grammar angle (`p`/`m`).
    Roll(f64),
    /// Flip the direction of every later rotation (`!`).
    ReverseTurns,

    // --- Pen ---
    /// Multiply the step length by the coefficient (`*`).
    Scale,
    /// Divide the step length by the coefficient (`/`).
    Shrink,
    /// Add or subtract the configured step delta (`u`/`v`).
    StepDelta(f64),
    /// Advance to the next palette entry (`.`).
    ColorToggle,

    // --- Flow Control ---
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op: symbol has no registered meaning.
    Ignore,
}
