//! Distance metric for delivery routing.
//!
//! All distances are Manhattan distances on raw coordinates; there is no
//! road network.

mod manhattan;

pub use manhattan::{manhattan, path_length, route_distance};
