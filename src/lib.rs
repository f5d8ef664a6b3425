//! Fuzzy inference over discretized membership functions.
//!
//! Two inference paths are provided:
//!
//! - Rule based: crisp inputs fire [`Rule`]s through a [`Combinator`], the
//!   consequents are aggregated with an [`Aggregation`] and defuzzified by
//!   centroid ([`defuzzify`]). [`Controller`] packages this into one call per
//!   control cycle.
//! - Relational: a [`Relation`] precomputes an implication relation between up
//!   to three antecedents and a consequent, then composes possibly
//!   non-singleton inputs against it with max-min composition.

mod controller;
mod dsl;
mod error;
mod grid;
mod inference;
mod math;
mod membership;
mod ops;
mod outputs;
mod relation;
mod rules;
mod shapes;
mod variable;

pub use controller::{Controller, ControllerConfig};
pub use dsl::Proposition;
pub use error::{FuzzyError, Result};
pub use grid::MAX_SAMPLES;
pub use inference::{defuzzify, defuzzify_by_name, Defuzzified};
pub use membership::Membership;
pub use ops::{product_and, product_or, zadeh_and, zadeh_or, Aggregation, Combinator, Implication};
pub use outputs::Outputs;
pub use relation::{Relation, RelationConfig};
pub use rules::Rule;
pub use shapes::Shape;
pub use variable::{Input, Term, TermKey};
