//! Mamdani relational model.
//!
//! A [`Relation`] precomputes the implication of every antecedent grid point
//! combination with every consequent grid point, then composes fuzzy inputs
//! against it through max-min composition. Building is `O(grid^dim)` in both
//! time and memory and belongs in setup code, evaluation is what runs per cycle.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::membership::Membership;
use crate::ops::Implication;

const MAX_DIM: usize = 3;

/// Resolution ceiling for relation models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationConfig {
    /// Largest number of cells a relation may hold. Each cell is one `f64`.
    pub max_cells: usize,
}

impl Default for RelationConfig {
    fn default() -> Self {
        // 128 MiB of cells
        Self { max_cells: 1 << 24 }
    }
}

impl RelationConfig {
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Relation {
    implication: Implication,
    /// Antecedent grid sizes followed by the consequent grid size
    shape: Vec<usize>,
    /// Row-major, the consequent index varies fastest
    cells: Vec<f64>,
    antecedent_grids: Vec<Vec<f64>>,
    consequent_domain: RangeInclusive<f64>,
    consequent_step: f64,
}

impl Relation {
    pub fn new<M: AsRef<Membership>>(
        antecedents: &[M],
        consequent: &Membership,
        implication: Implication,
    ) -> Result<Self> {
        Self::with_config(antecedents, consequent, implication, RelationConfig::default())
    }

    pub fn with_config<M: AsRef<Membership>>(
        antecedents: &[M],
        consequent: &Membership,
        implication: Implication,
        config: RelationConfig,
    ) -> Result<Self> {
        let dim = antecedents.len();

        if !(1..=MAX_DIM).contains(&dim) {
            return Err(FuzzyError::UnsupportedDimension(dim));
        }

        let shape: Vec<usize> = antecedents
            .iter()
            .map(|a| a.as_ref().len())
            .chain(Some(consequent.len()))
            .collect();
        let n_cells = shape
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .unwrap_or(usize::MAX);

        if n_cells > config.max_cells {
            return Err(FuzzyError::RelationTooLarge {
                cells: n_cells,
                limit: config.max_cells,
            });
        }

        let mut cells = Vec::with_capacity(n_cells);
        let mut index = [0; MAX_DIM];
        let mut memberships = [0.; MAX_DIM];

        loop {
            for (k, antecedent) in antecedents.iter().enumerate() {
                memberships[k] = antecedent.as_ref().values()[index[k]];
            }
            for &y in consequent.values() {
                cells.push(implication.call(&memberships[..dim], y));
            }

            if !advance(&mut index[..dim], &shape[..dim]) {
                break;
            }
        }

        debug_assert_eq!(cells.len(), n_cells);
        debug!(dim, ?shape, cells = n_cells, %implication, "built relation");

        Ok(Self {
            implication,
            shape,
            cells,
            antecedent_grids: antecedents.iter().map(|a| a.as_ref().grid_points().to_vec()).collect(),
            consequent_domain: consequent.domain(),
            consequent_step: consequent.step(),
        })
    }

    /// Number of antecedents.
    pub fn dim(&self) -> usize {
        self.antecedent_grids.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn implication(&self) -> Implication {
        self.implication
    }

    /// Relation values for every consequent sample at the given antecedent grid indices.
    pub fn row(&self, index: &[usize]) -> Option<&[f64]> {
        let dim = self.dim();

        if index.len() != dim || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }

        let n_y = self.shape[dim];
        let offset = index
            .iter()
            .zip(&self.shape)
            .fold(0, |offset, (&i, &n)| offset * n + i)
            * n_y;

        Some(&self.cells[offset..offset + n_y])
    }

    /// Max-min composition of one fuzzy input per antecedent with the relation.
    ///
    /// Each input is sampled on its antecedent's grid. The result lives on the
    /// consequent grid.
    pub fn evaluate<M: AsRef<Membership>>(&self, antecedent_primes: &[M]) -> Result<Membership> {
        let dim = self.dim();

        if antecedent_primes.len() != dim {
            return Err(FuzzyError::DimensionMismatch {
                expected: dim,
                found: antecedent_primes.len(),
            });
        }

        let primes: Vec<Vec<f64>> = antecedent_primes
            .iter()
            .zip(&self.antecedent_grids)
            .map(|(prime, grid)| grid.iter().map(|&x| prime.as_ref().interp(x)).collect())
            .collect();

        let n_y = self.shape[dim];
        let mut composed = vec![0.; n_y];
        let mut index = [0; MAX_DIM];
        let mut offset = 0;

        loop {
            let input = (0..dim).map(|k| primes[k][index[k]]).fold(1., f64::min);

            // Rows the input does not reach cannot raise the maximum
            if input > 0. {
                for (out, &r) in composed.iter_mut().zip(&self.cells[offset..offset + n_y]) {
                    *out = f64::max(*out, f64::min(input, r));
                }
            }

            offset += n_y;
            if !advance(&mut index[..dim], &self.shape[..dim]) {
                break;
            }
        }

        let mut consequent = Membership::new(self.consequent_domain.clone(), self.consequent_step)?;
        consequent.values_mut().copy_from_slice(&composed);

        Ok(consequent)
    }
}

// Odometer over a row-major index, returns false once every combination was visited
fn advance(index: &mut [usize], shape: &[usize]) -> bool {
    for (i, &n) in index.iter_mut().zip(shape).rev() {
        *i += 1;
        if *i < n {
            return true;
        }
        *i = 0;
    }

    false
}
