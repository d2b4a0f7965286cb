use crate::error::Result;
use crate::expander::Expander;
use crate::grammar::{Grammar, GrammarSource};
use crate::interpreter::{RenderConfig, TurtleInterpreter, TurtleParams};
use crate::path::DrawingPath;
use log::info;

/// Expands `grammar` and interprets the result.
///
/// The symbol ceiling `config.max_symbols` is checked before the first generation is
/// built.
pub fn render(grammar: &Grammar, config: &RenderConfig) -> Result<DrawingPath> {
    let symbols = Expander::new()
        .with_limit(config.max_symbols)
        .expand(grammar)?;

    let interpreter = TurtleInterpreter::from_config(config.clone());
    let path = interpreter.interpret(&symbols, &TurtleParams::from(grammar))?;

    info!(
        "rendered {} symbols into {} segments ({} primitives)",
        symbols.chars().count(),
        path.line_count(),
        path.len()
    );
    Ok(path)
}

/// Compiles `source` and renders it.
pub fn render_source(source: &GrammarSource, config: &RenderConfig) -> Result<DrawingPath> {
    render(&source.compile()?, config)
}
