pub mod location;
pub mod restaurant;

pub use location::{resolve_location, Coordinate, LocationResolution, StoredLocation};
pub use restaurant::{Restaurant, ScoredRestaurant};
