use std::time::Duration;
use touchsynth_core::types::{Point, Rect};

pub type CliResult<T> = anyhow::Result<T>;

/// Parses `x,y`.
pub fn parse_point(value: &str) -> Result<Point, String> {
    let mut parts = value.split(',');
    let x = next_f64(&mut parts, "x", value, "x,y")?;
    let y = next_f64(&mut parts, "y", value, "x,y")?;
    if parts.next().is_some() {
        return Err(format!("expected point 'x,y', got '{value}'"));
    }
    Ok(Point::new(x, y))
}

/// Parses `x,y,width,height`.
pub fn parse_rect(value: &str) -> Result<Rect, String> {
    let shape = "x,y,width,height";
    let mut parts = value.split(',');
    let x = next_f64(&mut parts, "x", value, shape)?;
    let y = next_f64(&mut parts, "y", value, shape)?;
    let width = next_f64(&mut parts, "width", value, shape)?;
    let height = next_f64(&mut parts, "height", value, shape)?;
    if parts.next().is_some() {
        return Err(format!("expected rect '{shape}', got '{value}'"));
    }
    if width < 0.0 || height < 0.0 {
        return Err(format!("rect size must not be negative, got '{value}'"));
    }
    Ok(Rect::new(x, y, width, height))
}

pub fn parse_millis(value: &str) -> Result<Duration, String> {
    let millis: u64 = value.parse().map_err(|err| format!("invalid duration '{value}': {err}"))?;
    Ok(Duration::from_millis(millis))
}

fn next_f64<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    name: &str,
    original: &str,
    shape: &str,
) -> Result<f64, String> {
    let value = parts
        .next()
        .ok_or_else(|| format!("expected '{shape}', got '{original}'"))?
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid {name} component '{original}': {err}"))?;
    if !value.is_finite() {
        return Err(format!("{name} component must be finite in '{original}'"));
    }
    Ok(value)
}
