//! # lsys-curves
//!
//! Generates vector curves from Lindenmayer-system grammars.
//!
//! A [`GrammarSource`] (axiom, `;`-separated rules, angles, iteration count) is compiled
//! into a [`Grammar`], expanded generation by generation by the [`Expander`], and walked
//! by the [`TurtleInterpreter`] into an engine-agnostic [`DrawingPath`] of move, line,
//! color and scale primitives. Rasterizing that path is left to the caller.
//!
//! ```text
//! GrammarSource → compile → Grammar → Expander → symbols → TurtleInterpreter → DrawingPath
//! ```

pub mod catalog;
pub mod error;
pub mod expander;
pub mod grammar;
pub mod interpreter;
pub mod path;
pub mod pipeline;
pub mod turtle;

pub use catalog::*;
pub use error::*;
pub use expander::*;
pub use grammar::*;
pub use interpreter::*;
pub use path::*;
pub use pipeline::*;
pub use turtle::*;
