//! Discretized membership functions.
//!
//! A [`Membership`] samples a degree of truth in `[0, 1]` on a uniform grid
//! spanning its domain. Point evaluation between samples is linear, and every
//! value outside the domain has membership zero.

use std::ops::RangeInclusive;

use crate::error::{FuzzyError, Result};
use crate::grid::{grid_len, Grid};
use crate::math::{self, floor_index, interp, into_range, nearest_index};

/// How point evaluation is performed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Kind {
    /// Linear interpolation between grid samples
    Sampled,
    /// Closed-form gaussian, the grid samples only back alpha-cuts and centroids
    Gaussian { mean: f64, stddev: f64, max_value: f64 },
}

impl Kind {
    pub(crate) fn gaussian(x: f64, mean: f64, stddev: f64, max_value: f64) -> f64 {
        max_value * f64::exp(-(x - mean).powi(2) / (2. * stddev.powi(2)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Membership {
    min: f64,
    max: f64,
    step: f64,
    grid: Vec<f64>,
    values: Vec<f64>,
    kind: Kind,
}

impl Membership {
    /// Creates a function over `domain` sampled every `step`, with every sample at zero.
    pub fn new(domain: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let min = *domain.start();
        let max = *domain.end();

        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(FuzzyError::InvalidDomain { min, max });
        }
        if !step.is_finite() || step <= 0. {
            return Err(FuzzyError::InvalidStep(step));
        }

        let grid: Vec<f64> = Grid::new(min, max, step).ok_or(FuzzyError::InvalidStep(step))?.collect();

        Ok(Self {
            min,
            max,
            step,
            values: vec![0.; grid.len()],
            grid,
            kind: Kind::Sampled,
        })
    }

    /// Samples `f` at every grid point. Results are clamped into `[0, 1]`.
    pub fn from_fn(domain: RangeInclusive<f64>, step: f64, mut f: impl FnMut(f64) -> f64) -> Result<Self> {
        let mut this = Self::new(domain, step)?;

        for (value, &x) in this.values.iter_mut().zip(&this.grid) {
            *value = into_range(0., 1., f(x));
        }

        Ok(this)
    }

    /// Piecewise-linear function through `(x, membership)` coordinates, which
    /// must be ordered by `x`. Membership saturates at the first and last
    /// coordinate.
    pub fn from_points(domain: RangeInclusive<f64>, step: f64, coords: &[(f64, f64)]) -> Result<Self> {
        let ordered = coords.windows(2).all(|w| w[0].0 <= w[1].0);
        let finite = coords.iter().all(|(x, y)| x.is_finite() && y.is_finite());

        if !ordered || !finite {
            return Err(FuzzyError::MalformedPoints {
                shape: "piecewise",
                points: coords.iter().map(|(x, _)| *x).collect(),
            });
        }

        let mut this = Self::new(domain, step)?;
        let sampled = interp(this.grid.iter().copied(), coords);

        for (value, sample) in this.values.iter_mut().zip(sampled) {
            *value = into_range(0., 1., sample);
        }

        Ok(this)
    }

    /// Fuzzifies a crisp value: membership one on the grid sample nearest to
    /// `at`, zero everywhere else. All zeros when `at` lies outside the domain.
    pub fn singleton(domain: RangeInclusive<f64>, step: f64, at: f64) -> Result<Self> {
        let mut this = Self::new(domain, step)?;

        if this.contains(at) {
            this.set_value_at(at, 1.);
        }

        Ok(this)
    }

    pub(crate) fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn domain(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid samples.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// The ascending sample grid.
    pub fn grid_points(&self) -> &[f64] {
        &self.grid
    }

    /// Membership of each grid sample, parallel to [`Membership::grid_points`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest sampled membership.
    pub fn height(&self) -> f64 {
        f64::max(0., math::max(self.values.iter().copied()))
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Degree of membership of `x`.
    ///
    /// Zero outside the domain. On a sample the stored value is returned,
    /// between two samples the value is linearly interpolated. Gaussian
    /// functions evaluate their closed form instead.
    pub fn interp(&self, x: f64) -> f64 {
        if !self.contains(x) {
            return 0.;
        }

        if let Kind::Gaussian { mean, stddev, max_value } = self.kind {
            return into_range(0., 1., Kind::gaussian(x, mean, stddev, max_value));
        }

        let i = floor_index(x, self.min, self.step, self.grid.len());
        let (x1, y1) = (self.grid[i], self.values[i]);

        if x == x1 || i + 1 == self.grid.len() {
            return y1;
        }

        let (x2, y2) = (self.grid[i + 1], self.values[i + 1]);

        into_range(0., 1., y1 + (y2 - y1) / (x2 - x1) * (x - x1))
    }

    /// Grid samples whose membership is at least `alpha`, in ascending order.
    pub fn alpha_cut(&self, alpha: f64) -> Vec<f64> {
        self.grid
            .iter()
            .zip(&self.values)
            .filter_map(|(&x, &value)| (value >= alpha).then_some(x))
            .collect()
    }

    /// Whether `x` passes the alpha-cut at level `alpha`.
    pub fn alpha_cut_contains(&self, alpha: f64, x: f64) -> bool {
        self.interp(x) >= alpha
    }

    /// Overwrites the sample nearest to `x` with `value` clamped into `[0, 1]`.
    ///
    /// A function written this way is evaluated from its samples from then on.
    pub fn set_value_at(&mut self, x: f64, value: f64) {
        let i = nearest_index(x, self.min, self.step, self.grid.len());

        self.values[i] = into_range(0., 1., value);
        self.kind = Kind::Sampled;
    }

    /// Standard fuzzy complement `1 - v`.
    pub fn complement(&self) -> Self {
        self.map_values(|v| 1. - v)
    }

    /// Yager complement `(1 - v^w)^(1/w)`. `w = 1` is the standard complement.
    pub fn yager_complement(&self, w: f64) -> Result<Self> {
        if !w.is_finite() || w <= 0. {
            return Err(FuzzyError::InvalidComplementWeight(w));
        }

        Ok(self.map_values(|v| (1. - v.powf(w)).powf(1. / w)))
    }

    fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            min: self.min,
            max: self.max,
            step: self.step,
            grid: self.grid.clone(),
            values: self.values.iter().map(|&v| into_range(0., 1., f(v))).collect(),
            kind: Kind::Sampled,
        }
    }

    /// Center of gravity.
    ///
    /// With `dx <= 0` the domain is treated as discrete and the weighted mean
    /// of the grid samples is returned. Otherwise the domain is resampled every
    /// `dx` through [`Membership::interp`] and integrated with a left Riemann sum.
    pub fn centroid(&self, dx: f64) -> Result<f64> {
        let (numerator, denominator) = if dx > 0. {
            // Left Riemann sum, the right edge of the domain is never sampled
            let n = grid_len(self.min, self.max, dx).ok_or(FuzzyError::InvalidStep(dx))? - 1;

            (0..n)
                .map(|i| self.min + dx * i as f64)
                .map(|x| (x, self.interp(x) * dx))
                .fold((0., 0.), |(num, den), (x, area)| (num + x * area, den + area))
        } else {
            self.grid
                .iter()
                .zip(&self.values)
                .fold((0., 0.), |(num, den), (&x, &v)| (num + x * v, den + v))
        };

        if denominator <= 0. || !denominator.is_finite() {
            return Err(FuzzyError::ZeroMass);
        }

        Ok(numerator / denominator)
    }
}

impl AsRef<Membership> for Membership {
    fn as_ref(&self) -> &Membership {
        self
    }
}
