//! Grammar definitions and the compiler that validates them.
//!
//! A [`GrammarSource`] is the raw record as it appears in a grammar catalog: the rules are
//! still one `;`-separated string. [`GrammarSource::compile`] turns it into a [`Grammar`],
//! the validated form consumed by the [`Expander`](crate::Expander) and the
//! [`TurtleInterpreter`](crate::TurtleInterpreter).

use crate::error::{LsysError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Separates rule clauses in the raw rule text.
pub const CLAUSE_DELIMITER: char = ';';

/// Separates a rule head from its body inside a clause.
pub const HEAD_DELIMITER: char = ':';

/// Immutable mapping from a head symbol to its replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    rules: HashMap<char, String>,
}

impl RuleTable {
    /// Builds a table from `(head, body)` pairs.
    ///
    /// A head listed twice with the same body is accepted once; two distinct bodies for one
    /// head are a configuration error.
    pub fn from_rules<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut table = HashMap::new();
        for (head, body) in rules {
            let body = body.into();
            match table.get(&head) {
                Some(existing) if *existing == body => {
                    warn!("rule for '{head}' is listed twice with the same body");
                }
                Some(existing) => {
                    return Err(LsysError::InvalidGrammar(format!(
                        "symbol '{head}' has two rules: '{existing}' and '{body}'"
                    )));
                }
                None => {
                    table.insert(head, body);
                }
            }
        }
        Ok(Self { rules: table })
    }

    /// Parses raw rule text such as `"X : F+[[X]-X]-F[-FX]+X ; F : FF"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for clause in text.split(CLAUSE_DELIMITER) {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            pairs.push(parse_clause(clause)?);
        }
        Self::from_rules(pairs)
    }

    /// Replacement for `symbol`, if a rule exists.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_clause(clause: &str) -> Result<(char, String)> {
    let (head, body) = clause.split_once(HEAD_DELIMITER).ok_or_else(|| {
        LsysError::InvalidGrammar(format!("rule clause '{clause}' has no '{HEAD_DELIMITER}'"))
    })?;

    let mut head_chars = head.trim().chars();
    let symbol = match (head_chars.next(), head_chars.next()) {
        (Some(c), None) => c,
        (None, _) => {
            return Err(LsysError::InvalidGrammar(format!(
                "rule clause '{clause}' has an empty head"
            )));
        }
        (Some(_), Some(_)) => {
            return Err(LsysError::InvalidGrammar(format!(
                "rule head '{}' must be a single symbol",
                head.trim()
            )));
        }
    };

    // Bodies are written with cosmetic spacing; every other character is a symbol.
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    Ok((symbol, body))
}

/// A grammar record as stored in a catalog.
///
/// Field names follow the catalog format; optional fields fall back to their documented
/// defaults when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarSource {
    pub axiom: String,

    /// How many times the axiom is concatenated to form generation 0.
    #[serde(default = "default_axiom_multiplier")]
    pub axiom_multiplier: i64,

    /// `;`-separated `head:body` clauses.
    #[serde(default)]
    pub rules: String,

    /// Turn angle in degrees.
    pub rotation_angle: f64,

    /// Number of generations.
    pub nb_iter: i64,

    /// Symbols excluded from rewriting.
    #[serde(default)]
    pub skipped: String,

    /// Initial heading in degrees.
    #[serde(default)]
    pub starting_angle: f64,

    /// Step length multiplier used by `*`.
    #[serde(default = "default_coeff")]
    pub coeff: f64,
}

fn default_axiom_multiplier() -> i64 {
    1
}

fn default_coeff() -> f64 {
    1.0
}

impl GrammarSource {
    /// A record with the given axiom, rules, angle and generation count; other fields default.
    pub fn new(axiom: &str, rules: &str, rotation_angle: f64, nb_iter: i64) -> Self {
        Self {
            axiom: axiom.to_string(),
            axiom_multiplier: default_axiom_multiplier(),
            rules: rules.to_string(),
            rotation_angle,
            nb_iter,
            skipped: String::new(),
            starting_angle: 0.0,
            coeff: default_coeff(),
        }
    }

    pub fn with_axiom_multiplier(mut self, multiplier: i64) -> Self {
        self.axiom_multiplier = multiplier;
        self
    }

    pub fn with_skipped(mut self, skipped: &str) -> Self {
        self.skipped = skipped.to_string();
        self
    }

    pub fn with_starting_angle(mut self, degrees: f64) -> Self {
        self.starting_angle = degrees;
        self
    }

    pub fn with_coeff(mut self, coeff: f64) -> Self {
        self.coeff = coeff;
        self
    }

    /// Validates the record and builds its [`Grammar`].
    ///
    /// # Errors
    /// [`LsysError::InvalidGrammar`] for a malformed clause, a conflicting head, a negative
    /// iteration count, an axiom multiplier below one, or a non-finite numeric parameter.
    pub fn compile(&self) -> Result<Grammar> {
        let iteration_count = usize::try_from(self.nb_iter).map_err(|_| {
            LsysError::InvalidGrammar(format!(
                "iteration count must be non-negative, got {}",
                self.nb_iter
            ))
        })?;

        let axiom_repeat = usize::try_from(self.axiom_multiplier)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                LsysError::InvalidGrammar(format!(
                    "axiom multiplier must be at least 1, got {}",
                    self.axiom_multiplier
                ))
            })?;

        for (name, value) in [
            ("rotation angle", self.rotation_angle),
            ("starting angle", self.starting_angle),
            ("scale coefficient", self.coeff),
        ] {
            if !value.is_finite() {
                return Err(LsysError::InvalidGrammar(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        Ok(Grammar {
            axiom: self.axiom.clone(),
            rules: RuleTable::parse(&self.rules)?,
            rotation_angle: self.rotation_angle,
            starting_angle: self.starting_angle,
            iteration_count,
            axiom_repeat,
            skipped: self.skipped.chars().filter(|c| !c.is_whitespace()).collect(),
            scale_coefficient: self.coeff,
        })
    }
}

/// A validated grammar, ready for expansion.
///
/// Only [`GrammarSource::compile`] builds one; it serializes for inspection but is
/// deserialized through its [`GrammarSource`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grammar {
    pub axiom: String,
    pub rules: RuleTable,
    /// Degrees.
    pub rotation_angle: f64,
    /// Degrees.
    pub starting_angle: f64,
    pub iteration_count: usize,
    pub axiom_repeat: usize,
    pub skipped: BTreeSet<char>,
    pub scale_coefficient: f64,
}

impl Grammar {
    /// Replacement for `symbol` during expansion, honouring the skipped set.
    pub fn production(&self, symbol: char) -> Option<&str> {
        if self.skipped.contains(&symbol) {
            None
        } else {
            self.rules.get(symbol)
        }
    }

    /// Generation 0: the axiom repeated `axiom_repeat` times.
    pub fn initial_string(&self) -> String {
        self.axiom.repeat(self.axiom_repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_whitespace_is_stripped_and_dots_kept() {
        let table = RuleTable::parse(" X : F + [ . X ] ; F: F F ;").unwrap();
        assert_eq!(table.get('X'), Some("F+[.X]"));
        assert_eq!(table.get('F'), Some("FF"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_rule_text_gives_empty_table() {
        assert!(RuleTable::parse("").unwrap().is_empty());
        assert!(RuleTable::parse(" ; ;").unwrap().is_empty());
    }

    #[test]
    fn clause_split_on_first_colon_only() {
        let table = RuleTable::parse("A: B:C").unwrap();
        assert_eq!(table.get('A'), Some("B:C"));
    }

    #[test]
    fn empty_body_is_a_deletion_rule() {
        let table = RuleTable::parse("X:").unwrap();
        assert_eq!(table.get('X'), Some(""));
    }

    #[test]
    fn clause_without_delimiter_is_rejected() {
        let err = RuleTable::parse("F:FF;G").unwrap_err();
        assert!(matches!(err, LsysError::InvalidGrammar(_)));
    }

    #[test]
    fn multi_symbol_head_is_rejected() {
        assert!(matches!(
            RuleTable::parse("AB:C"),
            Err(LsysError::InvalidGrammar(_))
        ));
        assert!(matches!(
            RuleTable::parse(" :C"),
            Err(LsysError::InvalidGrammar(_))
        ));
    }

    #[test]
    fn conflicting_heads_are_rejected_but_repeats_allowed() {
        assert!(RuleTable::parse("F:FF;F:F F").is_ok());
        assert!(matches!(
            RuleTable::parse("F:FF;F:F+F"),
            Err(LsysError::InvalidGrammar(_))
        ));
    }

    #[test]
    fn compile_validates_scalars() {
        let negative = GrammarSource::new("F", "", 90.0, -1);
        assert!(matches!(
            negative.compile(),
            Err(LsysError::InvalidGrammar(_))
        ));

        let nan = GrammarSource::new("F", "", f64::NAN, 1);
        assert!(matches!(nan.compile(), Err(LsysError::InvalidGrammar(_))));

        let zero_repeat = GrammarSource::new("F", "", 90.0, 1).with_axiom_multiplier(0);
        assert!(matches!(
            zero_repeat.compile(),
            Err(LsysError::InvalidGrammar(_))
        ));
    }

    #[test]
    fn compile_is_deterministic() {
        let source = GrammarSource::new("X", "X:F[+X]-X;F:FF", 25.0, 4)
            .with_skipped(" X ")
            .with_coeff(0.9);
        let a = source.compile().unwrap();
        let b = source.compile().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.skipped, BTreeSet::from(['X']));
    }

    #[test]
    fn skipped_symbols_have_no_production() {
        let grammar = GrammarSource::new("AB", "A:AB;B:A", 90.0, 1)
            .with_skipped("B")
            .compile()
            .unwrap();
        assert_eq!(grammar.production('A'), Some("AB"));
        assert_eq!(grammar.production('B'), None);
    }
}
