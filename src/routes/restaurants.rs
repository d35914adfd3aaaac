use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Coordinate, ScoredRestaurant},
    routes::AppState,
    services::recommendations,
};

/// Raw query string; coordinates are validated by hand so the error body is ours
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    /// Optional search term matched against restaurant names and category tags
    pub keyword: Option<String>,
}

impl RecommendationQuery {
    /// Validates the query into a user coordinate
    pub fn coordinate(&self) -> AppResult<Coordinate> {
        let (latitude, longitude) = match (non_empty(&self.latitude), non_empty(&self.longitude))
        {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::InvalidInput(
                    "Latitude and longitude are required".to_string(),
                ))
            }
        };

        let invalid =
            || AppError::InvalidInput("Invalid latitude or longitude values".to_string());
        let latitude: f64 = latitude.parse().map_err(|_| invalid())?;
        let longitude: f64 = longitude.parse().map_err(|_| invalid())?;

        Coordinate::new(latitude, longitude)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Handler for restaurant recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<ScoredRestaurant>>> {
    let user = query.coordinate().map_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Rejected recommendation request");
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        latitude = user.latitude,
        longitude = user.longitude,
        keyword = query.keyword.as_deref(),
        "Processing recommendation request"
    );

    let restaurants = recommendations::recommend_restaurants(
        state.restaurant_source.as_ref(),
        user,
        query.keyword.as_deref(),
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        count = restaurants.len(),
        "Recommendation completed"
    );

    Ok(Json(restaurants))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(latitude: Option<&str>, longitude: Option<&str>) -> RecommendationQuery {
        RecommendationQuery {
            latitude: latitude.map(str::to_string),
            longitude: longitude.map(str::to_string),
            keyword: None,
        }
    }

    #[test]
    fn test_missing_parameter_is_required_error() {
        for q in [
            query(None, Some("121.5")),
            query(Some("25.0"), None),
            query(Some(""), Some("121.5")),
            query(Some("  "), Some("121.5")),
        ] {
            let err = q.coordinate().unwrap_err();
            assert_eq!(err.to_string(), "Latitude and longitude are required");
        }
    }

    #[test]
    fn test_unparseable_parameter_is_invalid_error() {
        for q in [
            query(Some("north"), Some("121.5")),
            query(Some("25.0"), Some("NaN")),
            query(Some("inf"), Some("121.5")),
        ] {
            let err = q.coordinate().unwrap_err();
            assert_eq!(err.to_string(), "Invalid latitude or longitude values");
        }
    }

    #[test]
    fn test_valid_parameters_parse() {
        let coordinate = query(Some("25.033"), Some(" 121.5654 ")).coordinate().unwrap();
        assert_eq!(coordinate.latitude, 25.033);
        assert_eq!(coordinate.longitude, 121.5654);
    }
}
