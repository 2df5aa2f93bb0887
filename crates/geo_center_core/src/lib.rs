//! Geometric median search over planar point sets, with mass centers,
//! nearest-neighbor path ordering and least-squares polynomial fits.

mod algo;
mod error;
mod geo;
mod io;
pub mod logging;
mod point;
mod point_set;

pub(crate) use algo::{center, path, polynomial};
pub(crate) use geo::{cartesian, geometry};
pub(crate) use io::options;

pub use algo::center::{CenterResult, geometric, improvement, mass};
pub use algo::path::{PathMetrics, path as plan_path, path_metrics};
pub use algo::polynomial::{best_fit, evaluate as evaluate_polynomial, guess_degree};
pub use error::{Error, Result};
pub use geo::cartesian::{DistanceUnit, distances_to, haversine_distance};
pub use geo::geometry::{dist, net_dist, norm_dist, path_length};
pub use io::input::{parse_points, read_points};
pub use io::options::{CenterOptions, LogFormat, LogLevel, RunOptions};
pub use point::Point;
pub use point_set::PointSet;
