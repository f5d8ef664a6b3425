/// Largest number of samples a grid may hold.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Number of samples `ceil((max - min) / step) + 1` on a grid covering `[min, max]`,
/// `None` when that exceeds [`MAX_SAMPLES`].
pub(crate) fn grid_len(min: f64, max: f64, step: f64) -> Option<usize> {
    let steps = (max - min) / step;
    let rounded = steps.round();
    // ceil alone would turn 10.000000000000002 into an extra sample
    let steps = if (steps - rounded).abs() < 1e-9 { rounded } else { steps.ceil() };

    if !(steps >= 0. && steps < MAX_SAMPLES as f64) {
        return None;
    }

    Some(steps as usize + 1)
}

/// Samples `min, min + step, ...` up to `max`. When the span is not a multiple
/// of `step` the last sample is pulled back onto `max` so the grid never leaves the domain.
pub(crate) struct Grid {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Grid {
    pub(crate) fn new(min: f64, max: f64, step: f64) -> Option<Self> {
        Some(Grid {
            start: min,
            end: max,
            step,
            index: 0,
            len: grid_len(min, max, step)?,
        })
    }
}

impl Iterator for Grid {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if i + 1 == self.len {
            Some(self.end)
        } else {
            // Multiply rather than accumulate so error does not build up along the grid
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Grid {}

#[test]
fn test_grid() {
    let collect = |min, max, step| Grid::new(min, max, step).map(Iterator::collect::<Vec<_>>);

    assert_eq!(collect(0., 2., 0.5), Some(vec![0., 0.5, 1., 1.5, 2.]));
    assert_eq!(collect(0., 1., 0.3), Some(vec![0., 0.3, 0.6, 0.8999999999999999, 1.]));
    assert_eq!(grid_len(0., 100., 0.5), Some(201));
    assert_eq!(grid_len(0., 1., 0.1), Some(11));
    assert_eq!(grid_len(-10., 10., 0.5), Some(41));
}

#[test]
fn test_grid_sample_ceiling() {
    assert_eq!(grid_len(0., 10., 1e-300), None);
    assert_eq!(grid_len(0., 1., 1. / MAX_SAMPLES as f64), None);
    assert_eq!(grid_len(0., 1., 2. / MAX_SAMPLES as f64), Some(MAX_SAMPLES / 2 + 1));
    assert!(Grid::new(0., 10., 1e-300).is_none());
}
