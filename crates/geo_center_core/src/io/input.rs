use std::{fs, io::Read, path::Path};

use crate::{Error, Result, point::Point};

/// Reads points from `path`, or from stdin when no path is given.
pub fn read_points(path: Option<&Path>) -> Result<Vec<Point>> {
    let raw = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read points from {}: {e}", path.display()))
        })?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };
    parse_points(&raw)
}

/// Parses whitespace-separated `x,y` tokens.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let token = idx + 1;
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::invalid_input(format!("Token {token}: missing x")))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {token}: missing y")))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {token}: expected 'x,y' but got extra comma fields: {tok}"
            )));
        }

        let x: f64 = x_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("Token {token}: invalid x: {x_s}")))?;
        let y: f64 = y_s
            .parse()
            .map_err(|_| Error::invalid_input(format!("Token {token}: invalid y: {y_s}")))?;

        points.push(Point::new(x, y));
    }

    if points.is_empty() {
        return Err(Error::invalid_input("No points provided."));
    }

    Ok(points)
}
