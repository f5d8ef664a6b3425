use std::borrow::Borrow;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::error::{FuzzyError, Result};
use crate::math::{argmax, into_range};
use crate::membership::Membership;
use crate::ops::Aggregation;
use crate::rules::Rule;

/// Aggregated output membership and its crisp centroid.
#[derive(Clone, Debug)]
pub struct Defuzzified {
    aggregate: Arc<Membership>,
    crisp: f64,
}

impl Defuzzified {
    pub fn aggregate(&self) -> &Arc<Membership> {
        &self.aggregate
    }

    pub fn crisp(&self) -> f64 {
        self.crisp
    }

    pub fn into_parts(self) -> (Arc<Membership>, f64) {
        (self.aggregate, self.crisp)
    }
}

/// Aggregates the consequents of `rules` and takes the centroid of the result.
///
/// `firing_strengths[i]` is the firing strength of `rules[i]`. Every consequent
/// is assumed to share the domain of the first rule's consequent. A negative
/// `dx` selects a discrete centroid and samples the aggregate with the first
/// consequent's own step instead of `step`.
///
/// [`Aggregation::MaxMin`] hands back the strongest rule's consequent itself;
/// every other method builds a fresh function, the rules are never modified.
pub fn defuzzify<R: Borrow<Rule>>(
    rules: &[R],
    firing_strengths: &[f64],
    aggregation: Aggregation,
    dx: f64,
    step: f64,
) -> Result<Defuzzified> {
    let Some(first) = rules.first() else {
        return Err(FuzzyError::EmptyRuleSet);
    };
    if firing_strengths.len() != rules.len() {
        return Err(FuzzyError::DimensionMismatch {
            expected: rules.len(),
            found: firing_strengths.len(),
        });
    }

    let first = first.borrow().consequent();
    let step = if dx < 0. { first.step() } else { step };

    trace!(%aggregation, rules = rules.len(), dx, step, "defuzzifying");

    let sample: fn(f64, f64, f64, f64) -> f64 = match aggregation {
        Aggregation::MaxMin => {
            // rules is non-empty so there is always a strongest rule
            let i = argmax(firing_strengths.iter().copied()).unwrap_or(0);
            let consequent = Arc::clone(rules[i].borrow().consequent());
            let crisp = consequent.centroid(dx)?;

            return Ok(Defuzzified {
                aggregate: consequent,
                crisp,
            });
        },
        Aggregation::Averaging => |running, consequent, _strength, average| {
            let clipped = if consequent >= average { average } else { consequent };
            f64::max(running, clipped)
        },
        Aggregation::RootSumSquare => |running, consequent, strength, _| f64::max(running, strength * consequent),
        Aggregation::CenterOfMass => |running, consequent, strength, _| {
            f64::max(running, f64::min(consequent, strength))
        },
        Aggregation::Sum => |running, consequent, strength, _| {
            let summed = running + f64::min(consequent, strength);
            into_range(0., 1., f64::max(running, summed))
        },
    };

    let average = firing_strengths.iter().sum::<f64>() / firing_strengths.len() as f64;
    let mut working = Membership::new(first.domain(), step)?;
    let grid = working.grid_points().to_vec();

    for (value, x) in working.values_mut().iter_mut().zip(grid) {
        let mut running = 0.;

        for (rule, &strength) in rules.iter().zip(firing_strengths) {
            let consequent = rule.borrow().consequent().interp(x);
            running = sample(running, consequent, strength, average);
        }

        *value = into_range(0., 1., running);
    }

    let crisp = working.centroid(dx)?;

    Ok(Defuzzified {
        aggregate: Arc::new(working),
        crisp,
    })
}

/// Like [`defuzzify`] with the aggregation picked by name.
///
/// An unknown name is logged and yields `Ok(None)`.
pub fn defuzzify_by_name<R: Borrow<Rule>>(
    rules: &[R],
    firing_strengths: &[f64],
    aggregation: &str,
    dx: f64,
    step: f64,
) -> Result<Option<Defuzzified>> {
    match Aggregation::from_name(aggregation) {
        Ok(aggregation) => defuzzify(rules, firing_strengths, aggregation, dx, step).map(Some),
        Err(err) => {
            warn!(%err, "skipping defuzzification");
            Ok(None)
        },
    }
}
