use std::{
    fmt::{Display, Write as _},
    fs,
    io::Write,
    time::Instant,
};

use log::info;

use geo_center_core::{
    Error, PointSet, Result, RunOptions, geometric, improvement, logging, mass, path_length,
    read_points,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = RunOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let points = read_points(options.input_path())?;
    let set = PointSet::new(points, options.center_options())?;
    info!("input: n={}", set.len());

    let report = render_report(&set, options.fit_degree())?;
    match options.output_path() {
        Some(path) => fs::write(path, report)?,
        None => std::io::stdout().lock().write_all(report.as_bytes())?,
    }

    info!(
        "output: n={} time={:.2}s",
        set.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

fn render_report(set: &PointSet, fit_degree: Option<usize>) -> Result<String> {
    let mass = mass(set.locations())?;
    let geometric = geometric(set.locations(), set.options())?;
    let path = set.path()?;
    let length = path_length(set.locations(), &path, set.options().degree)?;

    // A fit needs distinct x values and fewer coefficients than points.
    let fit = match set.best_fit(fit_degree) {
        Ok(coefficients) => join(coefficients.iter()),
        Err(e) => {
            log::warn!("fit skipped: {e}");
            String::new()
        }
    };

    let mut out = String::new();
    push_line(&mut out, "median", mass.center)?;
    push_line(&mut out, "center", geometric.center)?;
    push_line(&mut out, "score", geometric.score)?;
    push_line(&mut out, "improvement", improvement(&mass, &geometric))?;
    push_line(&mut out, "path", join(path.iter()))?;
    push_line(&mut out, "path_length", length)?;
    push_line(&mut out, "fit", fit)?;
    Ok(out)
}

fn push_line(out: &mut String, key: &str, value: impl Display) -> Result<()> {
    writeln!(out, "{key}={value}")
        .map_err(|e| Error::other(format!("failed to render {key}: {e}")))
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
