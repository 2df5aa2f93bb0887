//! Mass center and geometric median of planar point sets.
//!
//! The geometric median (the Weber point) has no closed form, so it is found
//! with a deterministic compass search starting from the mass center.

use std::f64::consts::SQRT_2;

use geo_center_derive::New;

use crate::{Error, Result, geometry, options::CenterOptions, point::Point};

const S2: f64 = SQRT_2 / 2.0;

/// Compass directions, counter-clockwise from west. Even indices are the
/// cardinal directions scanned without subsearch.
///
/// ```text
///            (0,1)
///     (-s,s)       (s,s)
/// (-1,0)       x       (1,0)
///     (-s,-s)      (s,-s)
///            (0,-1)
/// ```
const DIRECTIONS: [(f64, f64); 8] = [
    (-1.0, 0.0),
    (-S2, S2),
    (0.0, 1.0),
    (S2, S2),
    (1.0, 0.0),
    (S2, -S2),
    (0.0, -1.0),
    (-S2, -S2),
];

/// A center and its summed Euclidean distance to every point.
#[derive(Clone, Copy, Debug, PartialEq, New)]
pub struct CenterResult {
    pub center: Point,
    pub score: f64,
}

/// Arithmetic mean of the points, scored by summed distance.
pub fn mass(points: &[Point]) -> Result<CenterResult> {
    if points.is_empty() {
        return Err(Error::empty_points("mass center"));
    }

    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let center = Point::new(sx / n, sy / n);

    Ok(CenterResult::new(center, geometry::net_dist(points, center)))
}

/// Geometric median by first-improvement compass search.
///
/// Starts at the mass center with a step of `bounds` times the mean
/// point-to-center distance. Each round scans the directions in fixed order
/// and moves to the first candidate with a strictly lower score, rescanning
/// at the same step; a round without improvement halves the step. Stops once
/// the step is no larger than `epsilon`. The score never increases.
#[geo_center_derive::timer("center.geometric")]
pub fn geometric(points: &[Point], options: &CenterOptions) -> Result<CenterResult> {
    options.validate()?;
    let CenterResult {
        mut center,
        mut score,
    } = mass(points)?;

    let stride = if options.subsearch { 1 } else { 2 };
    let mut step = score / points.len() as f64 * options.bounds;
    let mut moves = 0usize;
    let mut halvings = 0usize;

    while step > options.epsilon {
        let improved = DIRECTIONS.iter().step_by(stride).find_map(|&(dx, dy)| {
            let candidate = Point::new(center.x + step * dx, center.y + step * dy);
            let candidate_score = geometry::net_dist(points, candidate);
            (candidate_score < score).then_some((candidate, candidate_score))
        });

        match improved {
            Some((candidate, candidate_score)) => {
                center = candidate;
                score = candidate_score;
                moves += 1;
            }
            None => {
                step /= 2.0;
                halvings += 1;
            }
        }
    }

    log::debug!(
        "center.geometric: n={} subsearch={} moves={moves} halvings={halvings} score={score}",
        points.len(),
        options.subsearch
    );

    Ok(CenterResult::new(center, score))
}

/// Relative score reduction of `geometric` over `mass`, `(mass - geometric) /
/// mass`. Zero when the mass score is zero.
pub fn improvement(mass: &CenterResult, geometric: &CenterResult) -> f64 {
    if mass.score == 0.0 {
        return 0.0;
    }
    (mass.score - geometric.score) / mass.score
}

#[cfg(test)]
mod tests {
    use super::{geometric, improvement, mass};
    use crate::{Error, options::CenterOptions, point::Point};

    fn fixture() -> Vec<Point> {
        vec![
            Point::new(1.0, 2.0),
            Point::new(5.0, 6.6),
            Point::new(-7.0, 8.1),
            Point::new(3.1, -1.7),
        ]
    }

    #[test]
    fn mass_is_the_arithmetic_mean() {
        let result = mass(&fixture()).expect("mass");
        assert_eq!(result.center, Point::new(0.525, 3.75));
        assert!(result.score > 0.0);
    }

    #[test]
    fn mass_rejects_empty_input() {
        let err = mass(&[]).expect_err("empty input should fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn mass_score_is_zero_for_coincident_points() {
        let points = vec![Point::new(2.5, -1.0); 3];
        let result = mass(&points).expect("mass");
        assert_eq!(result.center, Point::new(2.5, -1.0));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn geometric_matches_cardinal_fixture() {
        let result = geometric(&fixture(), &CenterOptions::default()).expect("geometric");
        assert_eq!(
            result.center,
            Point::new(0.9998479030807611, 2.000560357070879)
        );
        assert!((result.score - 20.41098713341468).abs() < 1e-9);
    }

    #[test]
    fn geometric_matches_subsearch_fixture() {
        let options = CenterOptions::default().with_subsearch(true);
        let result = geometric(&fixture(), &options).expect("geometric");
        assert_eq!(
            result.center,
            Point::new(0.9999063853985626, 2.001119760004479)
        );
    }

    #[test]
    fn geometric_never_scores_worse_than_mass() {
        let points = fixture();
        let com = mass(&points).expect("mass");
        for subsearch in [false, true] {
            let options = CenterOptions::default().with_subsearch(subsearch);
            let result = geometric(&points, &options).expect("geometric");
            assert!(result.score <= com.score);
        }
    }

    #[test]
    fn geometric_single_point_does_not_move() {
        let points = [Point::new(-3.0, 4.5)];
        let result = geometric(&points, &CenterOptions::default()).expect("geometric");
        assert_eq!(result.center, Point::new(-3.0, 4.5));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn geometric_scores_zero_only_for_coincident_points() {
        let points = vec![Point::new(2.5, -1.0); 4];
        for subsearch in [false, true] {
            let options = CenterOptions::default().with_subsearch(subsearch);
            let result = geometric(&points, &options).expect("geometric");
            assert_eq!(result.center, Point::new(2.5, -1.0));
            assert_eq!(result.score, 0.0);
        }

        let pair = [Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        let result = geometric(&pair, &CenterOptions::default()).expect("geometric");
        assert!((result.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn geometric_stays_on_the_line_for_collinear_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let com = mass(&points).expect("mass");
        for subsearch in [false, true] {
            let options = CenterOptions::default().with_subsearch(subsearch);
            let result = geometric(&points, &options).expect("geometric");
            assert_eq!(result.center.y, 0.0);
            assert!((1.0..=2.0).contains(&result.center.x), "got {:?}", result.center);
            assert!((result.score - 11.0).abs() < 1e-9);
            assert!(result.score <= com.score);
        }
    }

    #[test]
    fn geometric_never_scores_worse_than_mass_on_scattered_sets() {
        let sets: [&[[f64; 2]]; 3] = [
            &[[-4.0, 2.0], [7.0, 7.0], [3.0, -9.0], [0.0, 0.0], [12.0, 1.0], [-6.0, -5.0]],
            &[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [10.0, 0.0]],
            &[[5.0, 5.0], [5.0, 5.0], [-5.0, 5.0]],
        ];
        for raw in sets {
            let points: Vec<Point> = raw.iter().copied().map(Point::from).collect();
            let com = mass(&points).expect("mass");
            for subsearch in [false, true] {
                let options = CenterOptions::default().with_subsearch(subsearch);
                let result = geometric(&points, &options).expect("geometric");
                assert!(result.score <= com.score, "{raw:?} subsearch={subsearch}");
                assert!(result.score > 0.0);
            }
        }
    }

    #[test]
    fn improvement_is_relative_to_mass_score() {
        let points = fixture();
        let com = mass(&points).expect("mass");
        let result = geometric(&points, &CenterOptions::default()).expect("geometric");
        assert!((improvement(&com, &result) - 0.06535988277952172).abs() < 1e-12);

        let single = mass(&[Point::new(1.0, 1.0)]).expect("mass");
        assert_eq!(improvement(&single, &single), 0.0);
    }

    #[test]
    fn geometric_is_deterministic() {
        let points = fixture();
        let options = CenterOptions::default().with_subsearch(true);
        let first = geometric(&points, &options).expect("geometric");
        let second = geometric(&points, &options).expect("geometric");
        assert_eq!(first.center.x.to_bits(), second.center.x.to_bits());
        assert_eq!(first.center.y.to_bits(), second.center.y.to_bits());
        assert_eq!(first.score.to_bits(), second.score.to_bits());
    }

    #[test]
    fn geometric_follows_translation() {
        let points = fixture();
        let shifted: Vec<Point> = points.iter().map(|p| p.translate(10.0, -20.0)).collect();
        let options = CenterOptions::default();

        let base = geometric(&points, &options).expect("geometric");
        let moved = geometric(&shifted, &options).expect("geometric");

        assert!((moved.center.x - (base.center.x + 10.0)).abs() < 5e-3);
        assert!((moved.center.y - (base.center.y - 20.0)).abs() < 5e-3);
        assert!((moved.score - base.score).abs() < 1e-3);
    }

    #[test]
    fn geometric_approaches_the_median_of_a_square() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(100.0, 2.0),
        ];
        let options = CenterOptions::default().with_epsilon(1e-6);
        let result = geometric(&points, &options).expect("geometric");
        let com = mass(&points).expect("mass");
        assert!(result.score < com.score);
        assert!(result.center.x > 2.0 && result.center.x < 5.0);
        assert!((result.center.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn geometric_rejects_invalid_options() {
        let options = CenterOptions::default().with_epsilon(0.0);
        let err = geometric(&fixture(), &options).expect_err("epsilon 0 should fail");
        assert!(err.to_string().contains("epsilon"));
    }
}
