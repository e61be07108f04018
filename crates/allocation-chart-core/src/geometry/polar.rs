use crate::config::CENTER;
use crate::types::{Point, Radians};

/// Projects polar coordinates around a fixed square-viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    center: f64,
}

impl Projector {
    pub const fn new(center: f64) -> Self {
        Self { center }
    }

    pub const fn center(&self) -> Point {
        Point::new(self.center, self.center)
    }

    /// `angle` is measured from the positive x-axis, clockwise on screen.
    pub fn project(&self, radius: f64, angle: Radians) -> Point {
        Point::new(
            self.center + radius * angle.cos(),
            self.center + radius * angle.sin(),
        )
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(CENTER)
    }
}

/// Project around the default viewport center.
pub fn project(radius: f64, angle: Radians) -> Point {
    Projector::default().project(radius, angle)
}
