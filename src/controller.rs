//! Rule-base controller driven once per control cycle.
//!
//! A [`Controller`] owns its terms and rules; it is built during setup and
//! then only read. Each call to [`Controller::infer`] takes one crisp sensor
//! vector, fires every rule and defuzzifies the result into a single value.

use tracing::debug;

use crate::dsl::Proposition;
use crate::error::{FuzzyError, Result};
use crate::inference::defuzzify;
use crate::membership::Membership;
use crate::ops::{Aggregation, Combinator};
use crate::outputs::Outputs;
use crate::rules::Rule;
use crate::variable::{ControllerId, Input, Term, Terms};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Combines the antecedents of each rule into its firing strength
    pub combinator: Combinator,
    pub aggregation: Aggregation,
    /// Centroid resolution, `<= 0` for a discrete centroid
    pub dx: f64,
    /// Sample step of the aggregated output
    pub step: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            combinator: Combinator::ZadehAnd,
            aggregation: Aggregation::MaxMin,
            dx: 0.01,
            step: 0.01,
        }
    }
}

impl ControllerConfig {
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_aggregation_name(self, name: &str) -> Result<Self> {
        Ok(self.with_aggregation(Aggregation::from_name(name)?))
    }

    pub fn with_dx(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

struct ControllerRule {
    inputs: Vec<Input>,
    rule: Rule,
}

pub struct Controller {
    id: ControllerId,
    config: ControllerConfig,
    terms: Terms,
    n_inputs: usize,
    rules: Vec<ControllerRule>,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        let id = ControllerId::next();

        Self {
            id,
            config,
            terms: Terms::new(id),
            n_inputs: 0,
            rules: Vec::new(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Reserves the next position of the sensor vector.
    pub fn add_input(&mut self) -> Input {
        self.n_inputs += 1;
        Input {
            owner: self.id,
            index: self.n_inputs - 1,
        }
    }

    pub fn add_term(&mut self, membership: Membership) -> Term {
        self.terms.add(membership)
    }

    /// Registers the Yager complement of an existing term.
    pub fn add_complement(&mut self, term: Term, w: f64) -> Result<Term> {
        let complement = self.terms.get(term).ok_or(FuzzyError::UnknownTerm)?.yager_complement(w)?;

        Ok(self.terms.add(complement))
    }

    pub fn term(&self, term: Term) -> Option<&Membership> {
        self.terms.get(term).map(|m| &**m)
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn n_rules(&self) -> usize {
        self.rules.len()
    }

    /// Adds `if premise[0] and premise[1] ... then consequent`, combined with
    /// the configured [`Combinator`].
    pub fn add_rule(&mut self, premise: impl IntoIterator<Item = Proposition>, consequent: Term) -> Result<()> {
        let consequent = self.terms.get(consequent).ok_or(FuzzyError::UnknownTerm)?.clone();
        let mut inputs = Vec::new();
        let mut antecedents = Vec::new();

        for Proposition { input, term } in premise {
            if input.owner != self.id || input.index >= self.n_inputs {
                return Err(FuzzyError::UnknownInput(input.index));
            }

            inputs.push(input);
            antecedents.push(self.terms.get(term).ok_or(FuzzyError::UnknownTerm)?.clone());
        }

        self.rules.push(ControllerRule {
            inputs,
            rule: Rule::new(antecedents, consequent),
        });

        Ok(())
    }

    /// Runs one control cycle over `sensors`, one crisp value per input.
    pub fn infer(&self, sensors: &[f64]) -> Result<Outputs> {
        if sensors.len() != self.n_inputs {
            return Err(FuzzyError::DimensionMismatch {
                expected: self.n_inputs,
                found: sensors.len(),
            });
        }

        let mut firing_strengths = Vec::with_capacity(self.rules.len());
        let mut crisp_inputs = Vec::new();

        for ControllerRule { inputs, rule } in &self.rules {
            crisp_inputs.clear();
            crisp_inputs.extend(inputs.iter().map(|input| sensors[input.index]));
            firing_strengths.push(rule.evaluate(&crisp_inputs, self.config.combinator)?);
        }

        let rules: Vec<&Rule> = self.rules.iter().map(|r| &r.rule).collect();
        let defuzzified = defuzzify(
            &rules,
            &firing_strengths,
            self.config.aggregation,
            self.config.dx,
            self.config.step,
        )?;

        debug!(?firing_strengths, crisp = defuzzified.crisp(), "controller cycle");

        Ok(Outputs::new(firing_strengths, defuzzified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_ROT_VEL: f64 = 10.;

    struct CarController {
        controller: Controller,
        left: Input,
        right: Input,
        front: Input,
    }

    // Wall avoidance: steer away from walls closing in on the front and a side,
    // keep straight when nothing is close
    fn car_controller(config: ControllerConfig) -> CarController {
        let mut controller = Controller::new(config);
        let left = controller.add_input();
        let right = controller.add_input();
        let front = controller.add_input();

        let close_to_front =
            controller.add_term(Membership::trapezoidal(0. ..=100., [0., 0., 50., 60.], 0.5).unwrap());
        let close_to_left = controller.add_term(Membership::gaussian(0. ..=100., 0., 20., 0.1).unwrap());
        let close_to_right = controller.add_term(Membership::gaussian(0. ..=100., 0., 20., 0.1).unwrap());
        let far_from_front = controller.add_complement(close_to_front, 1.).unwrap();
        let far_from_left = controller.add_complement(close_to_left, 1.).unwrap();
        let far_from_right = controller.add_complement(close_to_right, 1.).unwrap();

        let domain = -MAX_ROT_VEL..=MAX_ROT_VEL;
        let turn_right = controller.add_term(
            Membership::trapezoidal(domain.clone(), [-MAX_ROT_VEL, -MAX_ROT_VEL, -5., -0.5], 0.5).unwrap(),
        );
        let turn_left = controller
            .add_term(Membership::trapezoidal(domain.clone(), [0.5, 5., MAX_ROT_VEL, MAX_ROT_VEL], 0.5).unwrap());
        let keep_straight = controller.add_term(Membership::gaussian(domain, 0., 0.5, 0.5).unwrap());

        controller
            .add_rule([left.is(close_to_left), front.is(close_to_front)], turn_right)
            .unwrap();
        controller
            .add_rule([right.is(close_to_right), front.is(close_to_front)], turn_left)
            .unwrap();
        controller
            .add_rule(
                [right.is(far_from_right), left.is(far_from_left), front.is(far_from_front)],
                keep_straight,
            )
            .unwrap();

        CarController {
            controller,
            left,
            right,
            front,
        }
    }

    fn sensors(car: &CarController, left: f64, right: f64, front: f64) -> Vec<f64> {
        let mut sensors = vec![0.; car.controller.n_inputs()];
        sensors[car.left.index()] = left;
        sensors[car.right.index()] = right;
        sensors[car.front.index()] = front;
        sensors
    }

    #[test]
    fn test_open_road_keeps_straight() {
        let car = car_controller(ControllerConfig::default().with_dx(0.1));
        let outputs = car.controller.infer(&sensors(&car, 100., 100., 100.)).unwrap();

        let strengths = outputs.firing_strengths();
        assert_eq!(strengths[0], 0.);
        assert_eq!(strengths[1], 0.);
        assert!(strengths[2] > 0.99);
        assert!(outputs.crisp().abs() < 1e-6);
    }

    #[test]
    fn test_walls_steer_away() {
        let car = car_controller(ControllerConfig::default().with_dx(0.1));

        // Wall ahead and to the left
        let outputs = car.controller.infer(&sensors(&car, 5., 90., 20.)).unwrap();
        assert!(outputs.firing_strengths()[0] > 0.9);
        assert!(outputs.crisp() < -5.5 && outputs.crisp() > -7., "{}", outputs.crisp());

        // Wall ahead and to the right
        let outputs = car.controller.infer(&sensors(&car, 90., 5., 20.)).unwrap();
        assert!(outputs.firing_strengths()[1] > 0.9);
        assert!(outputs.crisp() > 5.5 && outputs.crisp() < 7., "{}", outputs.crisp());
    }

    #[test]
    fn test_blended_aggregation() {
        let config = ControllerConfig::default()
            .with_aggregation_name("center_of_mass")
            .unwrap()
            .with_step(0.1)
            .with_dx(0.05);
        let car = car_controller(config);
        let outputs = car.controller.infer(&sensors(&car, 10., 40., 55.)).unwrap();

        assert_eq!(outputs.aggregate().step(), 0.1);
        assert!(outputs.aggregate().values().iter().all(|v| (0. ..=1.).contains(v)));
        // Left wall is closer than the right one
        assert!(outputs.crisp() < 0.);
    }

    #[test]
    fn test_config_rejects_unknown_aggregation() {
        assert_eq!(
            ControllerConfig::default().with_aggregation_name("bogus"),
            Err(FuzzyError::UnknownAggregation("bogus".to_owned()))
        );
    }

    #[test]
    fn test_handles_are_checked() {
        let mut other = Controller::new(ControllerConfig::default());
        let foreign_input = {
            other.add_input();
            other.add_input()
        };
        let foreign_term = other.add_term(Membership::new(0. ..=1., 0.1).unwrap());

        let mut controller = Controller::new(ControllerConfig::default());
        let input = controller.add_input();

        assert_eq!(controller.add_rule([input.is(foreign_term)], foreign_term), Err(FuzzyError::UnknownTerm));

        let term = controller.add_term(Membership::new(0. ..=1., 0.1).unwrap());
        assert_eq!(
            controller.add_rule([foreign_input.is(term)], term),
            Err(FuzzyError::UnknownInput(1))
        );
        assert_eq!(controller.n_rules(), 0);

        assert_eq!(
            controller.infer(&[0.5, 0.5]).unwrap_err(),
            FuzzyError::DimensionMismatch { expected: 1, found: 2 }
        );
        assert_eq!(controller.infer(&[0.5]).unwrap_err(), FuzzyError::EmptyRuleSet);
    }

    #[test]
    fn test_handles_from_another_controller_are_rejected() {
        let mut other = Controller::new(ControllerConfig::default());
        let foreign_input = other.add_input();
        let foreign_term = other.add_term(Membership::new(0. ..=1., 0.1).unwrap());

        let mut controller = Controller::new(ControllerConfig::default());
        let input = controller.add_input();
        let term = controller.add_term(Membership::new(0. ..=1., 0.1).unwrap());

        // Same slot and position in both controllers
        assert_eq!(input.index(), foreign_input.index());
        assert!(controller.term(term).is_some());
        assert!(controller.term(foreign_term).is_none());

        assert_eq!(controller.add_rule([input.is(foreign_term)], term), Err(FuzzyError::UnknownTerm));
        assert_eq!(controller.add_rule([input.is(term)], foreign_term), Err(FuzzyError::UnknownTerm));
        assert_eq!(
            controller.add_rule([foreign_input.is(term)], term),
            Err(FuzzyError::UnknownInput(0))
        );
        assert_eq!(controller.add_complement(foreign_term, 1.), Err(FuzzyError::UnknownTerm));
        assert_eq!(controller.n_rules(), 0);
        assert_eq!(controller.n_terms(), 1);

        assert_eq!(controller.add_rule([input.is(term)], term), Ok(()));
        assert_eq!(controller.n_rules(), 1);
    }
}
