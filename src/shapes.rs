//! Analytic membership shapes.
//!
//! Shapes are construction strategies: each one fills the samples of a
//! regular [`Membership`] from a closed form. Only gaussians keep their
//! closed form around for point evaluation.

use std::ops::RangeInclusive;

use crate::error::{FuzzyError, Result};
use crate::membership::{Kind, Membership};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// `[min, peak, max]`
    Triangular([f64; 3]),
    /// `[min, left corner, right corner, max]`
    Trapezoidal([f64; 4]),
    Gaussian { mean: f64, stddev: f64 },
}

impl Shape {
    fn name(&self) -> &'static str {
        match self {
            Self::Triangular(_) => "triangular",
            Self::Trapezoidal(_) => "trapezoidal",
            Self::Gaussian { .. } => "gaussian",
        }
    }

    fn validate(&self) -> Result<()> {
        let points: &[f64] = match self {
            Self::Triangular(points) => points,
            Self::Trapezoidal(points) => points,
            Self::Gaussian { mean, stddev } => {
                if !mean.is_finite() {
                    return Err(FuzzyError::MalformedPoints {
                        shape: self.name(),
                        points: vec![*mean],
                    });
                }
                if !stddev.is_finite() || *stddev <= 0. {
                    return Err(FuzzyError::InvalidStdDev(*stddev));
                }
                return Ok(());
            },
        };

        let finite = points.iter().all(|p| p.is_finite());
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);

        if finite && ordered {
            Ok(())
        } else {
            Err(FuzzyError::MalformedPoints {
                shape: self.name(),
                points: points.to_vec(),
            })
        }
    }

    /// Closed form of the shape at `x`, peaking at `max_value`.
    pub fn eval(&self, x: f64, max_value: f64) -> f64 {
        match *self {
            Self::Triangular([min, peak, max]) => {
                if x < min || x > max {
                    0.
                } else if x < peak {
                    rising(x, min, peak, max_value)
                } else {
                    falling(x, peak, max, max_value)
                }
            },
            Self::Trapezoidal([min, left, right, max]) => {
                if x < min || x > max {
                    0.
                } else if x < left {
                    rising(x, min, left, max_value)
                } else if x <= right {
                    max_value
                } else {
                    falling(x, right, max, max_value)
                }
            },
            Self::Gaussian { mean, stddev } => Kind::gaussian(x, mean, stddev, max_value),
        }
    }
}

// Equal endpoints collapse the ramp to a constant peak
fn rising(x: f64, from: f64, to: f64, max_value: f64) -> f64 {
    if to == from {
        max_value
    } else {
        max_value / (to - from) * (x - from)
    }
}

fn falling(x: f64, from: f64, to: f64, max_value: f64) -> f64 {
    if to == from {
        max_value
    } else {
        -max_value / (to - from) * (x - to)
    }
}

impl Membership {
    /// Samples `shape` over `domain`, scaled so its peak is `max_value`.
    pub fn from_shape(domain: RangeInclusive<f64>, step: f64, shape: Shape, max_value: f64) -> Result<Self> {
        if !(0. ..=1.).contains(&max_value) {
            return Err(FuzzyError::InvalidMaxValue(max_value));
        }
        shape.validate()?;

        let membership = Membership::from_fn(domain, step, |x| shape.eval(x, max_value))?;

        Ok(match shape {
            Shape::Gaussian { mean, stddev } => membership.with_kind(Kind::Gaussian { mean, stddev, max_value }),
            _ => membership,
        })
    }

    pub fn triangular(domain: RangeInclusive<f64>, points: [f64; 3], step: f64) -> Result<Self> {
        Self::from_shape(domain, step, Shape::Triangular(points), 1.)
    }

    pub fn trapezoidal(domain: RangeInclusive<f64>, points: [f64; 4], step: f64) -> Result<Self> {
        Self::from_shape(domain, step, Shape::Trapezoidal(points), 1.)
    }

    pub fn gaussian(domain: RangeInclusive<f64>, mean: f64, stddev: f64, step: f64) -> Result<Self> {
        Self::from_shape(domain, step, Shape::Gaussian { mean, stddev }, 1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoidal() {
        let close_to_front = Membership::trapezoidal(0. ..=100., [0., 0., 50., 60.], 0.5).unwrap();

        assert_eq!(close_to_front.interp(0.), 1.);
        assert_eq!(close_to_front.interp(10.), 1.);
        assert!((close_to_front.interp(55.) - 0.5).abs() < 1e-12);
        assert!((close_to_front.interp(57.25) - 0.275).abs() < 1e-12);
        assert_eq!(close_to_front.interp(60.), 0.);
        assert_eq!(close_to_front.interp(70.), 0.);
    }

    #[test]
    fn test_trapezoidal_degenerate_right_edge() {
        let turn_left = Membership::trapezoidal(-10. ..=10., [0.5, 5., 10., 10.], 0.5).unwrap();

        assert_eq!(turn_left.interp(0.), 0.);
        assert!((turn_left.interp(2.75) - 0.5).abs() < 1e-12);
        assert_eq!(turn_left.interp(7.), 1.);
        assert_eq!(turn_left.interp(10.), 1.);
    }

    #[test]
    fn test_triangular() {
        let m = Membership::triangular(0. ..=10., [2., 4., 8.], 1.).unwrap();

        assert_eq!(m.values(), &[0., 0., 0., 0.5, 1., 0.75, 0.5, 0.25, 0., 0., 0.]);
        assert_eq!(m.interp(4.), 1.);
        assert_eq!(m.interp(3.5), 0.75);

        let spike = Membership::triangular(0. ..=10., [3., 3., 3.], 1.).unwrap();
        assert_eq!(spike.alpha_cut(1.), vec![3.]);
        assert_eq!(spike.values().iter().sum::<f64>(), 1.);
    }

    #[test]
    fn test_peak_scaling() {
        let m = Membership::from_shape(0. ..=10., 1., Shape::Triangular([0., 5., 10.]), 0.5).unwrap();

        assert_eq!(m.interp(5.), 0.5);
        assert_eq!(m.interp(10.), 0.);
        assert_eq!(
            Membership::from_shape(0. ..=10., 1., Shape::Triangular([0., 5., 10.]), 1.5),
            Err(FuzzyError::InvalidMaxValue(1.5))
        );
    }

    #[test]
    fn test_gaussian() {
        let close_to_left = Membership::gaussian(0. ..=100., 0., 20., 0.1).unwrap();

        assert_eq!(close_to_left.interp(0.), 1.);
        assert!((close_to_left.interp(20.) - (-0.5f64).exp()).abs() < 1e-3);
        assert!((close_to_left.interp(20.) - 0.6065).abs() < 1e-3);
        assert_eq!(close_to_left.interp(-1.), 0.);

        // Point evaluation uses the closed form, not the grid
        let coarse = Membership::gaussian(0. ..=10., 5., 2., 5.).unwrap();
        let expected = (-(1.3f64).powi(2) / 8.).exp();
        assert!((coarse.interp(6.3) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_centroid_is_its_mean() {
        let m = Membership::gaussian(0. ..=100., 50., 10., 0.5).unwrap();

        assert!((m.centroid(0.).unwrap() - 50.).abs() < 1e-9);
        assert!((m.centroid(0.01).unwrap() - 50.).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        assert_eq!(
            Membership::triangular(0. ..=10., [5., 2., 8.], 1.),
            Err(FuzzyError::MalformedPoints {
                shape: "triangular",
                points: vec![5., 2., 8.],
            })
        );
        assert!(Membership::trapezoidal(0. ..=10., [0., 4., 3., 9.], 1.).is_err());
        assert!(Membership::trapezoidal(0. ..=10., [0., f64::NAN, 3., 9.], 1.).is_err());
        assert_eq!(
            Membership::gaussian(0. ..=10., 5., 0., 1.),
            Err(FuzzyError::InvalidStdDev(0.))
        );
    }
}
