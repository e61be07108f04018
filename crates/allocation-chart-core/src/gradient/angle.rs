use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Degrees;

/// Distance from the box center to each gradient endpoint, in
/// objectBoundingBox units (≈ √2 / 2).
pub const GRADIENT_HALF_LENGTH: f64 = 0.707;

/// Label → CSS gradient angle. Labels without an entry use 0°.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientAngleTable(BTreeMap<String, Degrees>);

impl GradientAngleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Angles used by the portfolio page for its sample holdings.
    pub fn reference() -> Self {
        [("BTC", 35.87), ("ETH", 27.79), ("GOLD", 92.41)]
            .into_iter()
            .collect()
    }

    pub fn insert(&mut self, label: impl Into<String>, angle: Degrees) -> Option<Degrees> {
        self.0.insert(label.into(), angle)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn angle_for(&self, label: &str) -> Degrees {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Degrees)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, Degrees)> for GradientAngleTable {
    fn from_iter<I: IntoIterator<Item = (K, Degrees)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Endpoints of an SVG linear gradient in objectBoundingBox units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientVector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Convert a CSS `linear-gradient` angle (0° points up, clockwise) into
/// SVG gradient endpoints symmetric about (0.5, 0.5).
pub fn gradient_vector(angle: Degrees) -> GradientVector {
    let rad = (angle - 90.0).to_radians();
    let dx = GRADIENT_HALF_LENGTH * rad.cos();
    let dy = GRADIENT_HALF_LENGTH * rad.sin();
    GradientVector {
        x1: 0.5 - dx,
        y1: 0.5 - dy,
        x2: 0.5 + dx,
        y2: 0.5 + dy,
    }
}
