use crate::variable::{Input, Term};

/// `input is term`, one antecedent of a controller rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposition {
    pub(crate) input: Input,
    pub(crate) term: Term,
}

impl Input {
    pub fn is(self, term: Term) -> Proposition {
        Proposition { input: self, term }
    }
}
