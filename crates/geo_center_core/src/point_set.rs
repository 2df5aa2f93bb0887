use crate::{
    Result,
    cartesian::{self, DistanceUnit},
    center,
    options::CenterOptions,
    path::{self, PathMetrics},
    point::Point,
    polynomial,
};

/// An ordered collection of points together with the options used to derive
/// its centers and path.
///
/// Derived values are recomputed from the current points on every call, so a
/// result obtained before a mutation describes the old points only. Indices in
/// a path refer to positions in [`PointSet::locations`].
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    locations: Vec<Point>,
    options: CenterOptions,
}

impl PointSet {
    /// Validates the options and every point; non-finite coordinates are
    /// rejected.
    pub fn new(locations: impl IntoIterator<Item = Point>, options: CenterOptions) -> Result<Self> {
        options.validate()?;
        let locations = locations
            .into_iter()
            .map(Point::validated)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { locations, options })
    }

    pub fn with_defaults(locations: impl IntoIterator<Item = Point>) -> Result<Self> {
        Self::new(locations, CenterOptions::default())
    }

    pub fn locations(&self) -> &[Point] {
        &self.locations
    }

    pub fn options(&self) -> &CenterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Appends `point`. Duplicates are allowed.
    pub fn add(&mut self, point: Point) -> Result<()> {
        self.locations.push(point.validated()?);
        Ok(())
    }

    /// Removes and returns the first point equal to `point`, or `None` when it
    /// is absent.
    pub fn remove(&mut self, point: &Point) -> Option<Point> {
        let idx = self.position(point)?;
        Some(self.locations.remove(idx))
    }

    /// Replaces the first point equal to `old` with `new` at the same index and
    /// returns the replaced value, or `None` when `old` is absent.
    pub fn adjust(&mut self, old: &Point, new: Point) -> Result<Option<Point>> {
        let new = new.validated()?;
        Ok(self
            .position(old)
            .map(|idx| std::mem::replace(&mut self.locations[idx], new)))
    }

    fn position(&self, point: &Point) -> Option<usize> {
        self.locations.iter().position(|p| p == point)
    }

    /// The mass center (arithmetic mean).
    pub fn median(&self) -> Result<Point> {
        Ok(center::mass(&self.locations)?.center)
    }

    /// The geometric center found by compass search.
    pub fn center(&self) -> Result<Point> {
        Ok(self.geometric()?.center)
    }

    /// Summed distance from the geometric center to every point.
    pub fn score(&self) -> Result<f64> {
        Ok(self.geometric()?.score)
    }

    /// Center and score from a single search.
    pub fn geometric(&self) -> Result<center::CenterResult> {
        center::geometric(&self.locations, &self.options)
    }

    /// Relative score reduction of the geometric center over the mass center,
    /// `1 - geometric / mass`. Zero when every point coincides.
    pub fn improvement(&self) -> Result<f64> {
        let mass = center::mass(&self.locations)?;
        if mass.score == 0.0 {
            return Ok(0.0);
        }
        Ok(center::improvement(&mass, &self.geometric()?))
    }

    /// Visiting order over point indices.
    pub fn path(&self) -> Result<Vec<usize>> {
        path::path(&self.locations, &self.options)
    }

    pub fn path_metrics(&self) -> Result<PathMetrics> {
        path::path_metrics(&self.locations, &self.path()?)
    }

    /// Great-circle distance from `destination` to each point, treating
    /// points as longitude/latitude degrees.
    pub fn distances_from(&self, destination: Point, unit: DistanceUnit) -> Vec<f64> {
        cartesian::distances_to(&self.locations, destination, unit)
    }

    /// Least-squares polynomial coefficients, lowest order first. Without a
    /// degree one is guessed from the points.
    pub fn best_fit(&self, degree: Option<usize>) -> Result<Vec<f64>> {
        let degree = degree.unwrap_or_else(|| polynomial::guess_degree(&self.locations));
        polynomial::best_fit(&self.locations, degree)
    }
}
