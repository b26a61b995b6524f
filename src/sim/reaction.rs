//! Reaction table and resolver
//!
//! Rules are data: an ordered list of unordered input pairs, each mapped to a
//! single product. Lookup is a linear scan, first match wins.

use serde::{Deserialize, Serialize};

use super::substance::Substance;

/// One rule: two inputs (order irrelevant) produce `product`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub inputs: [Substance; 2],
    pub product: Substance,
}

impl Reaction {
    pub fn new(a: impl Into<Substance>, b: impl Into<Substance>, product: impl Into<Substance>) -> Self {
        Self {
            inputs: [a.into(), b.into()],
            product: product.into(),
        }
    }

    /// True if this rule consumes `a` and `b`, in either order
    pub fn matches(&self, a: &Substance, b: &Substance) -> bool {
        let [x, y] = &self.inputs;
        (x == a && y == b) || (x == b && y == a)
    }
}

/// Static reaction table, fixed for the lifetime of an engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionTable {
    reactions: Vec<Reaction>,
}

impl ReactionTable {
    pub fn new(reactions: Vec<Reaction>) -> Self {
        Self { reactions }
    }

    /// Build from `(a, b, product)` triples, keeping their order
    pub fn from_triples<'a>(triples: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        Self::new(
            triples
                .into_iter()
                .map(|(a, b, product)| Reaction::new(a, b, product))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.iter()
    }
}

/// Resolve a pair of substances against the table.
///
/// Both orderings are checked against every rule; the first rule in table
/// order that matches decides the product. `None` means no reaction.
pub fn resolve(a: &Substance, b: &Substance, table: &ReactionTable) -> Option<Substance> {
    table
        .iter()
        .find(|reaction| reaction.matches(a, b))
        .map(|reaction| reaction.product.clone())
}
