//! Named collections of grammar records.
//!
//! A catalog document is a JSON object mapping each grammar name to a
//! [`GrammarSource`]. Reading the document from disk is left to the caller.

use crate::error::{LsysError, Result};
use crate::grammar::{Grammar, GrammarSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BUILTIN: &str = include_str!("../assets/grammars.json");

/// Grammar records indexed by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrammarCatalog {
    grammars: BTreeMap<String, GrammarSource>,
}

impl GrammarCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog document.
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// The catalog of classic curves bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    pub fn insert(&mut self, name: impl Into<String>, source: GrammarSource) {
        self.grammars.insert(name.into(), source);
    }

    /// Grammar names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&GrammarSource> {
        self.grammars.get(name)
    }

    /// Looks up `name` and compiles it.
    ///
    /// # Errors
    /// [`LsysError::UnknownGrammar`] if the name is absent, otherwise any compile error.
    pub fn compile(&self, name: &str) -> Result<Grammar> {
        self.get(name)
            .ok_or_else(|| LsysError::UnknownGrammar(name.to_string()))?
            .compile()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}
