/// Restaurant candidate sources
///
/// The recommendation engine never talks to storage directly. A source hands it
/// the full set of known restaurants for every request; how and where those
/// records live is the source's business.
use crate::{error::AppResult, models::Restaurant};

pub mod postgres;

pub use postgres::PgRestaurantSource;

/// Supplier of candidate restaurants
///
/// Implementations must tolerate concurrent reads: every request calls
/// `fetch_all` independently and nothing is cached between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Returns every known restaurant
    ///
    /// Connectivity or query failures are returned as errors; a source never
    /// answers with a partial list.
    async fn fetch_all(&self) -> AppResult<Vec<Restaurant>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
