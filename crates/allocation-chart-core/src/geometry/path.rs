use std::fmt::Write;

use crate::types::Point;

/// Format a coordinate with a fixed number of decimals, never emitting
/// negative zero.
pub fn fmt_coord(value: f64, precision: usize) -> String {
    let factor = 10f64.powi(precision as i32);
    let mut rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{rounded:.precision$}")
}

/// Incremental builder for SVG path data.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    data: String,
    precision: usize,
}

impl PathBuilder {
    pub fn new(precision: usize) -> Self {
        Self {
            data: String::with_capacity(160),
            precision,
        }
    }

    fn push_point(&mut self, p: Point) {
        let _ = write!(
            self.data,
            " {} {}",
            fmt_coord(p.x, self.precision),
            fmt_coord(p.y, self.precision)
        );
    }

    fn command(&mut self, cmd: char) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(cmd);
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.command('M');
        self.push_point(p);
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.command('L');
        self.push_point(p);
        self
    }

    /// Circular arc (rx == ry, no rotation) to `p`.
    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, p: Point) -> Self {
        self.command('A');
        let r = fmt_coord(radius, self.precision);
        let _ = write!(
            self.data,
            " {r} {r} 0 {} {}",
            u8::from(large_arc),
            u8::from(sweep)
        );
        self.push_point(p);
        self
    }

    pub fn close(mut self) -> Self {
        self.command('Z');
        self
    }

    pub fn finish(self) -> String {
        self.data
    }
}
