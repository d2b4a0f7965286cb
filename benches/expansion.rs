use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lsys_curves::{Expander, GrammarCatalog, RenderConfig, TurtleInterpreter, TurtleParams};

fn bench_expand_dragon(c: &mut Criterion) {
    let catalog = GrammarCatalog::builtin().unwrap();
    let mut grammar = catalog.compile("Dragon curve").unwrap();
    grammar.iteration_count = 14;
    let expander = Expander::new();

    c.bench_function("expand_dragon_14", |b| {
        b.iter(|| expander.expand(black_box(&grammar)).unwrap())
    });
}

fn bench_interpret_plant(c: &mut Criterion) {
    let catalog = GrammarCatalog::builtin().unwrap();
    let grammar = catalog.compile("Fractal plant").unwrap();
    let symbols = Expander::new().expand(&grammar).unwrap();
    let interpreter = TurtleInterpreter::from_config(RenderConfig::default());
    let params = TurtleParams::from(&grammar);

    c.bench_function("interpret_plant_5", |b| {
        b.iter(|| interpreter.interpret(black_box(&symbols), &params).unwrap())
    });
}

criterion_group!(benches, bench_expand_dragon, bench_interpret_plant);
criterion_main!(benches);
