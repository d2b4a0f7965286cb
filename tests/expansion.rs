// tests/expansion.rs
use lsys_curves::{
    Expander, GrammarSource, LsysError, RenderConfig, Resource, generations,
    projected_lengths, render, step,
};

#[test]
fn test_zero_iterations_returns_repeated_axiom() {
    // Rules are present but must not fire at generation 0.
    let grammar = GrammarSource::new("F+.", "F:F+.+F;+:-", 30.0, 0)
        .with_axiom_multiplier(4)
        .compile()
        .unwrap();

    let out = Expander::new().expand(&grammar).unwrap();
    assert_eq!(out, "F+.".repeat(4));
}

#[test]
fn test_single_and_multiple_generations() {
    let grammar = GrammarSource::new("A", "A:AB;B:BB", 90.0, 1)
        .compile()
        .unwrap();
    assert_eq!(Expander::new().expand(&grammar).unwrap(), "AB");

    let grammar = GrammarSource::new("AB", "A:AB;B:BB", 90.0, 3)
        .compile()
        .unwrap();
    assert_eq!(
        Expander::new().expand(&grammar).unwrap(),
        "ABBBBBBBBBBBBBBB"
    );
}

#[test]
fn test_rewriting_sees_only_previous_generation() {
    // If A's output were rewritten within the same pass, B would become C.
    let grammar = GrammarSource::new("A", "A:B;B:C", 90.0, 1)
        .compile()
        .unwrap();
    assert_eq!(Expander::new().expand(&grammar).unwrap(), "B");
}

#[test]
fn test_unmapped_symbols_pass_through() {
    let grammar = GrammarSource::new("X+F-Y", "X:XFX", 90.0, 2)
        .compile()
        .unwrap();
    assert_eq!(Expander::new().expand(&grammar).unwrap(), "XFXFXFX+F-Y");
}

#[test]
fn test_length_recurrence_holds_every_generation() {
    let grammar = GrammarSource::new("FX", "X:X+YF+;Y:-FX-Y", 90.0, 8)
        .compile()
        .unwrap();

    let gens: Vec<String> = generations(&grammar).collect();
    assert_eq!(gens.len(), 9);

    for pair in gens.windows(2) {
        let expected: usize = pair[0]
            .chars()
            .map(|c| grammar.production(c).map_or(1, |body| body.chars().count()))
            .sum();
        assert_eq!(pair[1].chars().count(), expected);
        assert_eq!(pair[1], step(&grammar, &pair[0]));
    }

    let projected = projected_lengths(&grammar);
    let actual: Vec<u128> = gens.iter().map(|g| g.chars().count() as u128).collect();
    assert_eq!(projected, actual);
}

#[test]
fn test_skipped_symbol_is_never_rewritten() {
    // '+' has a rule, but skipping takes precedence.
    let grammar = GrammarSource::new("F+F", "F:F+F;+:-", 90.0, 4)
        .with_skipped("+")
        .compile()
        .unwrap();

    for (generation, text) in generations(&grammar).enumerate() {
        assert!(
            !text.contains('-'),
            "generation {generation} rewrote a skipped symbol: {text}"
        );
    }
    let last = Expander::new().expand(&grammar).unwrap();
    assert_eq!(last.matches('+').count(), 2usize.pow(5) - 1);
}

#[test]
fn test_multibyte_symbols_are_sized_exactly() {
    let grammar = GrammarSource::new("⇧F", "F:F⇩F", 90.0, 3)
        .compile()
        .unwrap();
    let out = Expander::new().expand(&grammar).unwrap();
    assert_eq!(out.chars().count() as u128, *projected_lengths(&grammar).last().unwrap());
    assert!(out.starts_with("⇧F⇩F"));
}

#[test]
fn test_limit_rejects_before_expanding() {
    let grammar = GrammarSource::new("F", "F:F+F-F-F+F", 90.0, 10)
        .compile()
        .unwrap();
    let expander = Expander::new().with_limit(Some(1_000));

    match expander.expand(&grammar) {
        Err(LsysError::ResourceLimitExceeded {
            resource,
            limit,
            requested,
        }) => {
            assert_eq!(resource, Resource::Symbols);
            assert_eq!(limit, 1_000);
            // Generations run 1, 9, 49, 249, 1249: the first one over the ceiling is reported.
            assert_eq!(requested, 1_249);
            assert_eq!(requested, projected_lengths(&grammar)[4]);
        }
        other => panic!("expected ResourceLimitExceeded, got {other:?}"),
    }
}

#[test]
fn test_limit_counts_intermediate_generations() {
    // Generation 1 is long, generation 2 collapses back to nothing.
    let grammar = GrammarSource::new("A", "A:BBBBBBBBBB;B:", 90.0, 2)
        .compile()
        .unwrap();
    assert_eq!(projected_lengths(&grammar), vec![1, 10, 0]);

    assert!(Expander::new().with_limit(Some(5)).expand(&grammar).is_err());
    assert_eq!(
        Expander::new().with_limit(Some(10)).expand(&grammar).unwrap(),
        ""
    );
}

#[test]
fn test_projection_saturates_instead_of_overflowing() {
    let grammar = GrammarSource::new("F", "F:FFFFFFFFFF", 90.0, 60)
        .compile()
        .unwrap();
    assert_eq!(*projected_lengths(&grammar).last().unwrap(), u128::MAX);
    assert!(Expander::new().with_limit(Some(usize::MAX)).check(&grammar).is_err());
}

#[test]
fn test_huge_iteration_count_without_rules_settles() {
    let grammar = GrammarSource::new("F+.", "", 30.0, i64::MAX)
        .compile()
        .unwrap();

    assert_eq!(projected_lengths(&grammar), vec![3]);
    let expander = Expander::new().with_limit(Some(16_000_000));
    assert_eq!(expander.check(&grammar).unwrap(), 3);
    assert_eq!(expander.expand(&grammar).unwrap(), "F+.");

    let path = render(&grammar, &RenderConfig::default()).unwrap();
    assert_eq!(path.line_count(), 1);
}

#[test]
fn test_huge_iteration_count_stops_once_productions_run_out() {
    // X disappears after one generation; F has no rule.
    let grammar = GrammarSource::new("XF", "X:FF", 90.0, i64::MAX)
        .compile()
        .unwrap();

    assert_eq!(projected_lengths(&grammar), vec![2, 3]);
    assert_eq!(Expander::new().expand(&grammar).unwrap(), "FFF");
}

#[test]
fn test_huge_iteration_count_of_growing_grammar_hits_ceiling() {
    let grammar = GrammarSource::new("F", "F:FF", 90.0, i64::MAX)
        .compile()
        .unwrap();

    assert!(matches!(
        render(&grammar, &RenderConfig::default()),
        Err(LsysError::ResourceLimitExceeded {
            resource: Resource::Symbols,
            ..
        })
    ));
}
