use std::borrow::Borrow;
use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::inference::{self, Defuzzified};
use crate::membership::Membership;
use crate::ops::{Aggregation, Combinator};

/// One antecedent function per input dimension and the consequent they imply.
#[derive(Clone, Debug)]
pub struct Rule {
    antecedents: Vec<Arc<Membership>>,
    consequent: Arc<Membership>,
}

impl Rule {
    pub fn new<A>(antecedents: impl IntoIterator<Item = A>, consequent: impl Into<Arc<Membership>>) -> Self
    where
        A: Into<Arc<Membership>>,
    {
        Self {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
            consequent: consequent.into(),
        }
    }

    pub fn antecedents(&self) -> &[Arc<Membership>] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Arc<Membership> {
        &self.consequent
    }

    /// Firing strength of the rule for one crisp value per antecedent.
    pub fn evaluate(&self, inputs: &[f64], combinator: Combinator) -> Result<f64> {
        if inputs.len() != self.antecedents.len() {
            return Err(FuzzyError::DimensionMismatch {
                expected: self.antecedents.len(),
                found: inputs.len(),
            });
        }

        Ok(combinator.call(inputs, &self.antecedents))
    }

    /// See [`inference::defuzzify`].
    pub fn defuzzify<R: Borrow<Rule>>(
        rules: &[R],
        firing_strengths: &[f64],
        aggregation: Aggregation,
        dx: f64,
        step: f64,
    ) -> Result<Defuzzified> {
        inference::defuzzify(rules, firing_strengths, aggregation, dx, step)
    }
}
