use std::sync::Arc;

use crate::inference::Defuzzified;
use crate::membership::Membership;

/// Result of one controller cycle.
#[derive(Clone, Debug)]
pub struct Outputs {
    firing_strengths: Vec<f64>,
    defuzzified: Defuzzified,
}

impl Outputs {
    pub(crate) fn new(firing_strengths: Vec<f64>, defuzzified: Defuzzified) -> Self {
        Self {
            firing_strengths,
            defuzzified,
        }
    }

    /// Firing strength of each rule, in the order the rules were added.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn aggregate(&self) -> &Arc<Membership> {
        self.defuzzified.aggregate()
    }

    /// The crisp actuation value.
    pub fn crisp(&self) -> f64 {
        self.defuzzified.crisp()
    }
}
