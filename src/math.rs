use num::Float;

/// Tolerance used when snapping a domain value onto the sample grid.
const GRID_EPSILON: f64 = 1e-9;

/// Puts `x` back into `[min, max]` when it falls out of bounds.
pub(crate) fn into_range<F: Float>(min: F, max: F, x: F) -> F {
    if x.is_nan() {
        min
    } else {
        F::max(min, F::min(max, x))
    }
}

/// Index of the grid sample at or below `x` on a uniform grid starting at `min`.
///
/// Values within `GRID_EPSILON` cells of a sample snap onto it, so representation
/// error in `x` never pushes a lookup into the previous cell.
pub(crate) fn floor_index(x: f64, min: f64, step: f64, len: usize) -> usize {
    if len == 0 || x <= min {
        return 0;
    }
    let cells = (x - min) / step;
    let snapped = cells.round();
    let index = if (cells - snapped).abs() < GRID_EPSILON {
        snapped
    } else {
        cells.floor()
    };

    (index as usize).min(len - 1)
}

/// Index of the grid sample nearest to `x`, i.e. `round((x - min) / step)`.
pub(crate) fn nearest_index(x: f64, min: f64, step: f64, len: usize) -> usize {
    if len == 0 || x <= min {
        return 0;
    }

    (((x - min) / step).round() as usize).min(len - 1)
}

/// Largest value of the list, `-inf` when empty.
pub(crate) fn max<F: Float>(values: impl IntoIterator<Item = F>) -> F {
    values.into_iter().fold(F::neg_infinity(), F::max)
}

/// Smallest value of the list, `inf` when empty.
pub(crate) fn min<F: Float>(values: impl IntoIterator<Item = F>) -> F {
    values.into_iter().fold(F::infinity(), F::min)
}

/// Position of the largest value; ties resolve to the lowest index.
pub(crate) fn argmax<F: Float>(values: impl IntoIterator<Item = F>) -> Option<usize> {
    let mut best: Option<(usize, F)> = None;

    for (i, value) in values.into_iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {},
            _ => best = Some((i, value)),
        }
    }

    best.map(|(i, _)| i)
}

/// Similar to numpy.interp: piecewise-linear through `coords`, saturating at both ends.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input
        .into_iter()
        .map(|x| {
            let Some(&(first_x, first_y)) = coords.first() else {
                return F::zero();
            };
            if x <= first_x {
                return first_y;
            }

            for window in coords.windows(2) {
                let (x1, y1) = window[0];
                let (x2, y2) = window[1];

                if x1 <= x && x <= x2 {
                    if x2 == x1 {
                        return y2;
                    }
                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            // Past the last coordinate
            coords[coords.len() - 1].1
        })
        .collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_into_range() {
    assert_eq!(into_range(0., 1., 1.5), 1.);
    assert_eq!(into_range(0., 1., -0.2), 0.);
    assert_eq!(into_range(0., 1., 0.25), 0.25);
    assert_eq!(into_range(0., 1., f64::NAN), 0.);
}

#[test]
fn test_grid_indices() {
    // 0.0, 0.1, ..., 1.0
    assert_eq!(floor_index(0.3, 0., 0.1, 11), 3);
    assert_eq!(floor_index(0.35, 0., 0.1, 11), 3);
    assert_eq!(floor_index(0.7, 0., 0.1, 11), 7);
    assert_eq!(floor_index(-4., 0., 0.1, 11), 0);
    assert_eq!(floor_index(12., 0., 0.1, 11), 10);

    assert_eq!(nearest_index(0.36, 0., 0.1, 11), 4);
    assert_eq!(nearest_index(0.34, 0., 0.1, 11), 3);
    assert_eq!(nearest_index(5., 0., 0.1, 11), 10);
}

#[test]
fn test_list_extrema() {
    assert_eq!(max([0.2, 0.9, 0.1]), 0.9);
    assert_eq!(min([0.2, 0.9, 0.1]), 0.1);
    assert_eq!(max(Vec::<f64>::new()), f64::NEG_INFINITY);
    assert_eq!(min(Vec::<f64>::new()), f64::INFINITY);

    assert_eq!(argmax([0.2, 0.9, 0.1]), Some(1));
    assert_eq!(argmax([0.5, 0.9, 0.9]), Some(1));
    assert_eq!(argmax(Vec::<f64>::new()), None);
}
