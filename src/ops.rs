use num::Float;
use strum::{Display, EnumString};

use crate::error::{FuzzyError, Result};
use crate::math;
use crate::membership::Membership;

// The free combinators pair `inputs[i]` with `memberships[i]`. Both slices must
// have the same length; only debug builds check it, release builds stop at the
// shorter one. With no inputs they return their identity: 1 for AND, 0 for OR.
// `Rule::evaluate` validates the lengths and reports a mismatch as an error.

/// Minimum of the memberships of each input in its antecedent.
pub fn zadeh_and<M: AsRef<Membership>>(inputs: &[f64], memberships: &[M]) -> f64 {
    memberships_of(inputs, memberships).fold(1., f64::min)
}

/// Algebraic product of the memberships of each input in its antecedent.
pub fn product_and<M: AsRef<Membership>>(inputs: &[f64], memberships: &[M]) -> f64 {
    memberships_of(inputs, memberships).product()
}

/// Maximum of the memberships of each input in its antecedent.
pub fn zadeh_or<M: AsRef<Membership>>(inputs: &[f64], memberships: &[M]) -> f64 {
    memberships_of(inputs, memberships).fold(0., f64::max)
}

/// Probabilistic sum `a + b - ab` folded across the inputs.
pub fn product_or<M: AsRef<Membership>>(inputs: &[f64], memberships: &[M]) -> f64 {
    memberships_of(inputs, memberships).fold(0., |acc, m| acc + m - acc * m)
}

fn memberships_of<'a, M: AsRef<Membership>>(
    inputs: &'a [f64],
    memberships: &'a [M],
) -> impl Iterator<Item = f64> + 'a {
    debug_assert_eq!(inputs.len(), memberships.len());

    inputs
        .iter()
        .zip(memberships)
        .map(|(&x, membership)| membership.as_ref().interp(x))
}

/// Operator combining the memberships of every proposition in a rule premise.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Combinator {
    #[default]
    ZadehAnd,
    ProductAnd,
    ZadehOr,
    ProductOr,
}

impl Combinator {
    pub fn call<M: AsRef<Membership>>(self, inputs: &[f64], memberships: &[M]) -> f64 {
        match self {
            Self::ZadehAnd => zadeh_and(inputs, memberships),
            Self::ProductAnd => product_and(inputs, memberships),
            Self::ZadehOr => zadeh_or(inputs, memberships),
            Self::ProductOr => product_or(inputs, memberships),
        }
    }
}

/// Implication operator used to populate a fuzzy relation from antecedent
/// and consequent memberships.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Implication {
    /// Mamdani correlation-min
    #[default]
    CorrMin,
    /// Correlation-product (Larsen)
    CorrProduct,
    Lukasiewicz,
    /// Kleene-Dienes
    Classical,
}

impl Implication {
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse().map_err(|_| FuzzyError::UnknownImplication(name.to_owned()))
    }

    pub fn call<F: Float>(self, antecedents: &[F], consequent: F) -> F {
        match self {
            Self::CorrMin => F::min(math::min(antecedents.iter().copied()), consequent),
            Self::CorrProduct => antecedents.iter().fold(consequent, |acc, &a| acc * a),
            Self::Lukasiewicz => F::min(F::one(), F::one() - math::min(antecedents.iter().copied()) + consequent),
            Self::Classical => F::max(consequent, F::one() - math::min(antecedents.iter().copied())),
        }
    }
}

/// Method for aggregating the consequences of the fired rules.
///
/// `RootSumSquare` and `Averaging` keep the aggregation rules they have always
/// had (a firing-scaled max and an alpha-clipped max), not their textbook namesakes.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Aggregation {
    /// Consequent of the strongest rule, unmodified
    #[default]
    MaxMin,
    /// Consequents clipped at the mean firing strength, combined by max
    Averaging,
    /// Consequents scaled by their firing strength, combined by max
    RootSumSquare,
    /// Consequents clipped at their firing strength, combined by max
    CenterOfMass,
    /// Clipped consequents summed and saturated at one
    Sum,
}

impl Aggregation {
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse().map_err(|_| FuzzyError::UnknownAggregation(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Membership {
        Membership::from_fn(0. ..=10., 1., |x| x / 10.).unwrap()
    }

    fn inverse_ramp() -> Membership {
        Membership::from_fn(0. ..=10., 1., |x| 1. - x / 10.).unwrap()
    }

    #[test]
    fn test_and_ops() {
        let (ma, mb) = (ramp(), inverse_ramp());
        let inputs = [3., 4.];
        let memberships = [ma.clone(), mb.clone()];

        assert_eq!(zadeh_and(&inputs, &memberships), f64::min(ma.interp(3.), mb.interp(4.)));
        assert_eq!(product_and(&inputs, &memberships), ma.interp(3.) * mb.interp(4.));
        assert_eq!(Combinator::ZadehAnd.call(&inputs, &memberships), 0.3);
    }

    #[test]
    fn test_or_ops() {
        let memberships = [ramp(), inverse_ramp(), ramp()];
        let inputs = [3., 4., 5.];

        assert_eq!(zadeh_or(&inputs, &memberships), 0.6);

        let (a, b, c) = (0.3f64, 0.6f64, 0.5f64);
        let ab = a + b - a * b;
        assert!((product_or(&inputs, &memberships) - (ab + c - ab * c)).abs() < 1e-12);
        assert_eq!(Combinator::ProductOr.call(&inputs[..1], &memberships[..1]), 0.3);
    }

    #[test]
    fn test_ops_outside_domain() {
        let memberships = [ramp(), ramp()];

        assert_eq!(zadeh_and(&[5., 11.], &memberships), 0.);
        assert_eq!(zadeh_or(&[-1., 11.], &memberships), 0.);
    }

    #[test]
    fn test_ops_without_inputs_return_identity() {
        let none: [Membership; 0] = [];

        assert_eq!(zadeh_and(&[], &none), 1.);
        assert_eq!(product_and(&[], &none), 1.);
        assert_eq!(zadeh_or(&[], &none), 0.);
        assert_eq!(product_or(&[], &none), 0.);
    }

    #[test]
    fn test_implications() {
        let ants = [0.7, 0.4];

        assert_eq!(Implication::CorrMin.call(&ants, 0.9), 0.4);
        assert_eq!(Implication::CorrMin.call(&ants, 0.2), 0.2);
        assert!((Implication::CorrProduct.call(&ants, 0.5) - 0.14).abs() < 1e-12);
        assert_eq!(Implication::Lukasiewicz.call(&ants, 0.9), 1.);
        assert!((Implication::Lukasiewicz.call(&[0.9], 0.2) - 0.3).abs() < 1e-12);
        assert!((Implication::Classical.call(&ants, 0.1) - 0.6).abs() < 1e-12);
        assert_eq!(Implication::Classical.call(&ants, 0.8), 0.8);
    }

    #[test]
    fn test_names() {
        assert_eq!(Aggregation::from_name("root_sum_square"), Ok(Aggregation::RootSumSquare));
        assert_eq!(Aggregation::from_name("center_of_mass"), Ok(Aggregation::CenterOfMass));
        assert_eq!(Aggregation::MaxMin.to_string(), "max_min");
        assert_eq!(
            Aggregation::from_name("median"),
            Err(FuzzyError::UnknownAggregation("median".to_owned()))
        );
        assert_eq!(Implication::from_name("classical"), Ok(Implication::Classical));
        assert!(Implication::from_name("godel").is_err());
        assert_eq!("zadeh_or".parse::<Combinator>(), Ok(Combinator::ZadehOr));
    }
}
