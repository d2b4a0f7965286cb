//! Interpreter that converts an expanded symbol string into a [`DrawingPath`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`RenderConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or one of the
//! `populate_*` methods (or let [`TurtleInterpreter::from_config`] do it from the
//! configured [`SymbolProfile`]), then call [`TurtleInterpreter::interpret`].

use crate::error::{LsysError, Resource, Result};
use crate::grammar::Grammar;
use crate::path::{DrawPrimitive, DrawingPath};
use crate::turtle::{TurtleOp, TurtleState, initial_rotation};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which built-in symbol table an interpreter starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolProfile {
    /// `F G + - [ ] * .`; everything else is ignored.
    #[default]
    Standard,
    /// The standard table plus the extended curve alphabet (lifted-pen moves, scaled
    /// moves, 3D rotations, secondary angle, step arithmetic, round trips).
    Classic,
}

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Step length of a fresh turtle.
    pub unit_length: f64,
    /// Number of palette entries the color toggle cycles through.
    pub color_count: usize,
    /// Angle (in degrees) used by `<` and `>`.
    pub secondary_angle: f64,
    /// Amount added or removed by `u` and `v`.
    pub step_delta: f64,
    /// Maximum stack depth for push/pop operations.
    pub max_stack_depth: usize,
    /// Ceiling on the length of any generation; `None` disables the check.
    pub max_symbols: Option<usize>,
    pub profile: SymbolProfile,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            unit_length: 10.0,
            color_count: 3,
            secondary_angle: 10.0,
            step_delta: 0.1,
            max_stack_depth: 1024,
            max_symbols: Some(16_000_000),
            profile: SymbolProfile::Standard,
        }
    }
}

/// Per-grammar angles and coefficient driving the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleParams {
    /// Degrees.
    pub rotation_angle: f64,
    /// Degrees.
    pub starting_angle: f64,
    pub scale_coefficient: f64,
}

impl TurtleParams {
    pub fn new(rotation_angle: f64) -> Self {
        Self {
            rotation_angle,
            starting_angle: 0.0,
            scale_coefficient: 1.0,
        }
    }
}

impl From<&Grammar> for TurtleParams {
    fn from(grammar: &Grammar) -> Self {
        Self {
            rotation_angle: grammar.rotation_angle,
            starting_angle: grammar.starting_angle,
            scale_coefficient: grammar.scale_coefficient,
        }
    }
}

/// Interprets an expanded L-System string as turtle commands.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: RenderConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    pub fn new(config: RenderConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter whose symbol map is the one named by `config.profile`.
    pub fn from_config(config: RenderConfig) -> Self {
        let profile = config.profile;
        let mut interpreter = Self::new(config);
        match profile {
            SymbolProfile::Standard => interpreter.populate_standard_symbols(),
            SymbolProfile::Classic => interpreter.populate_classic_symbols(),
        }
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    ///
    /// Symbols absent from `map` are treated as [`TurtleOp::Ignore`].
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol, replacing any previous mapping.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// The operation bound to `symbol`.
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Registers the core drawing alphabet.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::Draw),
            ('G', TurtleOp::Draw),
            ('+', TurtleOp::Yaw(1.0)),
            ('-', TurtleOp::Yaw(-1.0)),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
            ('*', TurtleOp::Scale),
            ('.', TurtleOp::ColorToggle),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Registers the standard alphabet plus the extended curve alphabet.
    ///
    /// Upper-case `A`..=`T` draw (`M` and `P` pitch instead); their lower-case forms draw a
    /// scaled step (`m` and `p` roll instead). `U`, `V`, `W` move with the pen up.
    pub fn populate_classic_symbols(&mut self) {
        self.populate_standard_symbols();

        for c in 'A'..='T' {
            if c != 'M' && c != 'P' {
                self.set_op(c, TurtleOp::Draw);
                self.set_op(c.to_ascii_lowercase(), TurtleOp::DrawScaled);
            }
        }

        let mappings = [
            // Pen-up moves
            ('U', TurtleOp::Move),
            ('V', TurtleOp::Move),
            ('W', TurtleOp::Move),
            ('_', TurtleOp::DrawFromStart),
            // Vertical
            ('⇧', TurtleOp::Lift(1.0)),
            ('⇩', TurtleOp::Lift(-1.0)),
            // Rotation
            ('>', TurtleOp::YawSecondary(1.0)),
            ('<', TurtleOp::YawSecondary(-1.0)),
            ('p', TurtleOp::Roll(1.0)),
            ('m', TurtleOp::Roll(-1.0)),
            ('P', TurtleOp::Pitch(1.0)),
            ('M', TurtleOp::Pitch(-1.0)),
            ('!', TurtleOp::ReverseTurns),
            // Step
            ('/', TurtleOp::Shrink),
            ('u', TurtleOp::StepDelta(1.0)),
            ('v', TurtleOp::StepDelta(-1.0)),
            // Flow
            ('(', TurtleOp::Push),
            (')', TurtleOp::Pop),
            ('|', TurtleOp::RoundTrip),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Walks `symbols` once, left to right, and returns the emitted path.
    ///
    /// The turtle starts at the origin facing `params.starting_angle`, with a step of
    /// `unit_length` and color 0. The path always begins with `MoveTo(origin)`.
    ///
    /// # Push / Pop
    ///
    /// `[` saves the full turtle state. `]` restores it and emits a `MoveTo` to the restored
    /// position, followed by `SetScale`/`SetColor` when the restored values differ.
    ///
    /// # Errors
    /// - [`LsysError::UnbalancedBranch`] on a pop with an empty stack; the path emitted so
    ///   far is returned inside the error.
    /// - [`LsysError::ResourceLimitExceeded`] when a push would exceed `max_stack_depth`.
    /// - [`LsysError::InvalidGrammar`] when a [`TurtleOp::Shrink`] symbol is met while the
    ///   scale coefficient is zero.
    pub fn interpret(&self, symbols: &str, params: &TurtleParams) -> Result<DrawingPath> {
        let unit = self.config.unit_length;
        let angle = params.rotation_angle.to_radians();
        let secondary = self.config.secondary_angle.to_radians();
        let coeff = params.scale_coefficient;
        let color_count = self.config.color_count.max(1);
        let start_rotation = initial_rotation(params.starting_angle);

        let mut turtle = TurtleState::facing(params.starting_angle, unit);
        let mut stack: Vec<TurtleState> = Vec::new();
        let mut path = DrawingPath::new();
        path.push(DrawPrimitive::MoveTo(turtle.position));

        let scale_of = |t: &TurtleState| DrawPrimitive::SetScale(t.step_length / unit);

        for (index, sym) in symbols.chars().enumerate() {
            match self.op(sym) {
                // --- MOVEMENT ---
                TurtleOp::Draw => {
                    turtle.position = turtle.ahead(turtle.step_length);
                    path.push(DrawPrimitive::LineTo(turtle.position));
                }
                TurtleOp::DrawScaled => {
                    turtle.position = turtle.ahead(turtle.step_length * coeff);
                    path.push(DrawPrimitive::LineTo(turtle.position));
                }
                TurtleOp::Move => {
                    turtle.position = turtle.ahead(turtle.step_length);
                    path.push(DrawPrimitive::MoveTo(turtle.position));
                }
                TurtleOp::DrawFromStart => {
                    turtle.rotation = start_rotation;
                    turtle.position = turtle.ahead(turtle.step_length);
                    path.push(DrawPrimitive::LineTo(turtle.position));
                }
                TurtleOp::Lift(s) => {
                    turtle.position += DVec3::Z * (turtle.step_length * s);
                    path.push(DrawPrimitive::LineTo(turtle.position));
                }
                TurtleOp::RoundTrip => {
                    path.push(DrawPrimitive::LineTo(turtle.ahead(turtle.step_length)));
                    path.push(DrawPrimitive::LineTo(turtle.position));
                }

                // --- ROTATION ---
                TurtleOp::Yaw(s) => turtle.rotate_local_z(angle * s * turtle.turn_sign),
                TurtleOp::YawSecondary(s) => {
                    turtle.rotate_local_z(secondary * s * turtle.turn_sign)
                }
                TurtleOp::Pitch(s) => turtle.rotate_local_y(angle * s * turtle.turn_sign),
                TurtleOp::Roll(s) => turtle.rotate_local_x(angle * s * turtle.turn_sign),
                TurtleOp::ReverseTurns => turtle.turn_sign = -turtle.turn_sign,

                // --- PEN ---
                TurtleOp::Scale => {
                    turtle.step_length *= coeff;
                    path.push(scale_of(&turtle));
                }
                TurtleOp::Shrink => {
                    if coeff == 0.0 {
                        return Err(LsysError::InvalidGrammar(format!(
                            "symbol {index} divides the step by a zero scale coefficient"
                        )));
                    }
                    turtle.step_length /= coeff;
                    path.push(scale_of(&turtle));
                }
                TurtleOp::StepDelta(s) => {
                    turtle.step_length += self.config.step_delta * s;
                    path.push(scale_of(&turtle));
                }
                TurtleOp::ColorToggle => {
                    turtle.pen_color_index = (turtle.pen_color_index + 1) % color_count;
                    path.push(DrawPrimitive::SetColor(turtle.pen_color_index));
                }

                // --- FLOW ---
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LsysError::ResourceLimitExceeded {
                            resource: Resource::StackDepth,
                            limit: self.config.max_stack_depth as u128,
                            requested: stack.len() as u128 + 1,
                        });
                    }
                    stack.push(turtle.clone());
                }
                TurtleOp::Pop => {
                    let Some(saved) = stack.pop() else {
                        return Err(LsysError::UnbalancedBranch {
                            index,
                            partial: path,
                        });
                    };
                    path.push(DrawPrimitive::MoveTo(saved.position));
                    if saved.step_length != turtle.step_length {
                        path.push(scale_of(&saved));
                    }
                    if saved.pen_color_index != turtle.pen_color_index {
                        path.push(DrawPrimitive::SetColor(saved.pen_color_index));
                    }
                    turtle = saved;
                }
                TurtleOp::Ignore => {}
            }
        }

        Ok(path)
    }
}
