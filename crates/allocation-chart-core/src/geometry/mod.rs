//! Donut chart geometry: polar projection, annular slice paths and
//! leader line placement.

pub mod connector;
pub mod path;
pub mod polar;
pub mod slice;

pub use connector::{place_connector, ConnectorGeometry, TextAnchor};
pub use polar::{project, Projector};
pub use slice::{build_slices, layout_angles, SliceGeometry, SliceLayout};
