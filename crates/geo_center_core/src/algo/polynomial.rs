//! Least-squares polynomial fitting through planar points.

use crate::{Error, Result, point::Point};

const BASE_DEGREE: usize = 2;
const PIVOT_EPSILON: f64 = 1e-12;

/// Guesses a polynomial degree for `points` from their shape.
///
/// Walking the points in increasing `x`, every change of slope sign adds one
/// to a base degree of two. The guess never exceeds `n - 1`, the highest
/// degree `n` points determine.
pub fn guess_degree(points: &[Point]) -> usize {
    let n = points.len();
    if n <= 1 {
        return 0;
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let rising: Vec<bool> = sorted.windows(2).map(|w| w[0].y < w[1].y).collect();
    let extrema = rising.windows(2).filter(|w| w[0] != w[1]).count();

    (BASE_DEGREE + extrema).min(n - 1)
}

/// Coefficients `a_0..=a_k` of the degree-`k` polynomial
/// `y = a_0 + a_1 x + ... + a_k x^k` minimizing squared residuals.
///
/// Solves the normal equations `M a = b` where `M[r][c] = Σ x^(r+c)` and
/// `b[r] = Σ x^r y`.
#[geo_center_derive::timer("polynomial.best_fit")]
pub fn best_fit(points: &[Point], degree: usize) -> Result<Vec<f64>> {
    if points.is_empty() {
        return Err(Error::empty_points("polynomial fit"));
    }
    if degree >= points.len() {
        return Err(Error::invalid_input(format!(
            "polynomial fit of degree {degree} needs more than {} points",
            points.len()
        )));
    }
    let dim = degree + 1;

    let mut moments = vec![0.0; 2 * degree + 1];
    let mut projected = vec![0.0; dim];
    for p in points {
        let mut power = 1.0;
        for (deg, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if let Some(b) = projected.get_mut(deg) {
                *b += power * p.y;
            }
            power *= p.x;
        }
    }

    let mut augmented: Vec<Vec<f64>> = (0..dim)
        .map(|r| {
            let mut row: Vec<f64> = moments[r..r + dim].to_vec();
            row.push(projected[r]);
            row
        })
        .collect();

    eliminate_gaussian(&mut augmented)?;
    let coefficients = back_substitute(&augmented);
    log::debug!(
        "polynomial.best_fit: n={} degree={degree} coefficients={coefficients:?}",
        points.len()
    );
    Ok(coefficients)
}

/// Evaluates `a_0 + a_1 x + ...` by Horner's rule.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &a| acc * x + a)
}

/// Reduces an `n x (n + 1)` augmented matrix to row echelon form with partial
/// pivoting.
fn eliminate_gaussian(matrix: &mut [Vec<f64>]) -> Result<()> {
    let dim = matrix.len();
    for i in 0..dim {
        let pivot_row = (i..dim)
            .max_by(|&a, &b| matrix[a][i].abs().total_cmp(&matrix[b][i].abs()))
            .unwrap_or(i);
        if matrix[pivot_row][i].abs() < PIVOT_EPSILON {
            return Err(Error::invalid_data(format!(
                "polynomial fit of degree {} is underdetermined by the given points",
                dim - 1
            )));
        }
        matrix.swap(i, pivot_row);

        for j in (i + 1)..dim {
            let ratio = matrix[j][i] / matrix[i][i];
            for k in i..=dim {
                matrix[j][k] -= ratio * matrix[i][k];
            }
        }
    }
    Ok(())
}

fn back_substitute(matrix: &[Vec<f64>]) -> Vec<f64> {
    let dim = matrix.len();
    let mut solution = vec![0.0; dim];
    for row in (0..dim).rev() {
        let tail: f64 = ((row + 1)..dim)
            .map(|col| matrix[row][col] * solution[col])
            .sum();
        solution[row] = (matrix[row][dim] - tail) / matrix[row][row];
    }
    solution
}
