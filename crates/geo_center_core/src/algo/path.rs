//! Open-path ordering over point indices.
//!
//! Construction is greedy nearest neighbor over a precomputed cost matrix,
//! optionally followed by a bounded 2-opt pass that keeps the start fixed.

use geo_center_derive::New;

use crate::{
    Error, Result,
    geometry::{self, CostMatrix},
    options::CenterOptions,
    point::Point,
};

const MIN_PATH_SIZE_FOR_2OPT: usize = 3;

/// Leg statistics of an open path, in Euclidean units.
#[derive(Clone, Copy, Debug, Default, PartialEq, New)]
pub struct PathMetrics {
    pub legs: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

/// Orders every point index into an approximately shortest open path
/// starting at `options.start_index`.
///
/// The result is a permutation of `0..points.len()`. Leg costs use the
/// Minkowski norm of `options.degree`; ties go to the lowest index.
#[geo_center_derive::timer("path.plan")]
pub fn path(points: &[Point], options: &CenterOptions) -> Result<Vec<usize>> {
    options.validate()?;
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if options.start_index >= n {
        return Err(Error::invalid_input(format!(
            "start index {} is out of range for {n} points",
            options.start_index
        )));
    }

    let matrix = CostMatrix::build(points, options.degree);
    let mut order = nearest_neighbor(&matrix, options.start_index);
    log::debug!(
        "path.nearest_neighbor: n={n} start={} degree={} cost={}",
        options.start_index,
        options.degree,
        matrix.path_cost(&order)
    );

    if options.refine_passes > 0 {
        two_opt(&matrix, &mut order, options.refine_passes, options.epsilon);
    }

    Ok(order)
}

fn nearest_neighbor(matrix: &CostMatrix, start: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut nearest: Option<(usize, f64)> = None;
        for cand in (0..n).filter(|&cand| !visited[cand]) {
            let cost = matrix.get(current, cand);
            if nearest.is_none_or(|(_, best)| cost < best) {
                nearest = Some((cand, cost));
            }
        }
        // At least one unvisited point remains while order.len() < n.
        let Some((next, _)) = nearest else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Open-path 2-opt. Reverses `order[i+1..=k]` whenever that shortens the path
/// by more than `min_gain`; `order[0]` never moves.
fn two_opt(matrix: &CostMatrix, order: &mut [usize], passes: usize, min_gain: f64) {
    let n = order.len();
    if n < MIN_PATH_SIZE_FOR_2OPT {
        log::debug!("path.2opt: skip n={n} reason=insufficient_size");
        return;
    }

    let before = matrix.path_cost(order);
    let mut passes_executed = 0usize;
    let mut total_swaps = 0usize;
    for pass_idx in 0..passes {
        passes_executed = pass_idx + 1;
        let mut pass_swaps = 0usize;

        for i in 0..(n - 2) {
            for k in (i + 2)..n {
                let a = order[i];
                let b = order[i + 1];
                let c = order[k];

                let mut current = matrix.get(a, b);
                let mut proposal = matrix.get(a, c);
                if let Some(&d) = order.get(k + 1) {
                    current += matrix.get(c, d);
                    proposal += matrix.get(b, d);
                }

                if current - proposal > min_gain {
                    order[(i + 1)..=k].reverse();
                    pass_swaps += 1;
                }
            }
        }

        total_swaps += pass_swaps;
        log::debug!("path.2opt: pass={} swaps={pass_swaps}", pass_idx + 1);
        if pass_swaps == 0 {
            break;
        }
    }

    log::info!(
        "path.2opt: complete n={n} passes={passes_executed} swaps={total_swaps} cost_before={before:.6} cost_after={:.6}",
        matrix.path_cost(order)
    );
}

/// Euclidean leg statistics for `order` over `points`.
///
/// Fails when `order` holds an index outside `points`, e.g. a path computed
/// before the points changed.
pub fn path_metrics(points: &[Point], order: &[usize]) -> Result<PathMetrics> {
    let legs: Vec<f64> = geometry::legs(points, order)?
        .map(|(a, b)| geometry::dist(a, b))
        .collect();
    if legs.is_empty() {
        return Ok(PathMetrics::default());
    }

    let total: f64 = legs.iter().sum();
    let longest = legs.iter().copied().fold(0.0_f64, f64::max);
    let average = total / legs.len() as f64;

    Ok(PathMetrics::new(legs.len(), total, longest, average))
}
