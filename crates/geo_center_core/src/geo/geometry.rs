use rayon::prelude::*;

use crate::{Error, Result, point::Point};

/// Euclidean distance between two points.
#[inline]
pub fn dist(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Distance under the Minkowski norm of the given degree.
///
/// Degree 1 is the Manhattan distance and degree 2 the Euclidean one.
/// A degree of 0 is treated as 1. Higher degrees are computed relative to the
/// larger component, so they stay finite and approach the Chebyshev distance.
#[inline]
pub fn norm_dist(a: Point, b: Point, degree: u32) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    match degree {
        0 | 1 => dx + dy,
        2 => (dx * dx + dy * dy).sqrt(),
        degree => {
            let m = dx.max(dy);
            if m == 0.0 {
                return 0.0;
            }
            let p = f64::from(degree);
            m * ((dx / m).powf(p) + (dy / m).powf(p)).powf(p.recip())
        }
    }
}

/// Sum of Euclidean distances from `center` to every point, accumulated in
/// point order.
#[inline]
pub fn net_dist(points: &[Point], center: Point) -> f64 {
    points.iter().fold(0.0, |sum, &p| sum + dist(p, center))
}

/// Length of the open path visiting `points` in `order`.
pub fn path_length(points: &[Point], order: &[usize], degree: u32) -> Result<f64> {
    Ok(legs(points, order)?
        .map(|(a, b)| norm_dist(a, b, degree))
        .sum())
}

/// Consecutive point pairs along `order`. Every index must address `points`.
pub(crate) fn legs<'a>(
    points: &'a [Point],
    order: &'a [usize],
) -> Result<impl Iterator<Item = (Point, Point)> + 'a> {
    if let Some(&idx) = order.iter().find(|&&idx| idx >= points.len()) {
        return Err(Error::invalid_input(format!(
            "path index {idx} is out of range for {} points",
            points.len()
        )));
    }
    Ok(order
        .windows(2)
        .map(move |leg| (points[leg[0]], points[leg[1]])))
}

/// Row-major `n x n` matrix of pairwise norm distances.
pub(crate) struct CostMatrix {
    n: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    pub(crate) fn build(points: &[Point], degree: u32) -> Self {
        let n = points.len();
        let mut costs = vec![0.0; n * n];
        if n > 0 {
            costs
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(row, out)| {
                    let from = points[row];
                    for (col, cell) in out.iter_mut().enumerate() {
                        *cell = norm_dist(from, points[col], degree);
                    }
                });
        }
        Self { n, costs }
    }

    #[inline]
    pub(crate) fn get(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.n + to]
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    pub(crate) fn path_cost(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|leg| self.get(leg[0], leg[1])).sum()
    }
}
