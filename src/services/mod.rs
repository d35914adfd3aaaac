pub mod geo;
pub mod recommendations;
pub mod scoring;
pub mod sources;

pub use recommendations::{recommend, recommend_restaurants};
pub use sources::{PgRestaurantSource, RestaurantSource};
