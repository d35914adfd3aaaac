use crate::models::{Coordinate, Restaurant};

use super::geo::haversine_km;

pub const DISTANCE_WEIGHT: f64 = 0.4;
pub const RATING_WEIGHT: f64 = 0.4;
pub const PRICE_WEIGHT: f64 = 0.2;

/// Distance at which proximity stops contributing to the score
pub const MAX_USEFUL_DISTANCE_KM: f64 = 5.0;

pub const MAX_RATING: f64 = 5.0;

/// Price tier assumed when a restaurant has none recorded
pub const DEFAULT_PRICE_TIER: i32 = 1;

/// Linear falloff from 1.0 at the user's position to 0.0 at 5 km
pub fn distance_score(distance_km: f64) -> f64 {
    (1.0 - distance_km / MAX_USEFUL_DISTANCE_KM).max(0.0)
}

pub fn rating_score(rating: f64) -> f64 {
    rating / MAX_RATING
}

/// Cheapest tier scores 1.0, tier 5 scores 0.0
///
/// A missing or zero tier counts as tier 1.
pub fn price_score(price_level: Option<i32>) -> f64 {
    let tier = match price_level {
        Some(0) | None => DEFAULT_PRICE_TIER,
        Some(tier) => tier,
    };
    1.0 - (f64::from(tier) - 1.0) / 4.0
}

/// Weighted score for a restaurant at `location`, seen from `user`
///
/// Returns the score together with the distance it was derived from.
pub fn recommendation_score(
    restaurant: &Restaurant,
    location: Coordinate,
    user: Coordinate,
) -> (f64, f64) {
    let distance_km = haversine_km(user, location);

    let score = DISTANCE_WEIGHT * distance_score(distance_km)
        + RATING_WEIGHT * rating_score(restaurant.rating)
        + PRICE_WEIGHT * price_score(restaurant.price_level);

    (score, distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(rating: f64, price_level: Option<i32>) -> Restaurant {
        Restaurant {
            id: "r".to_string(),
            place_id: String::new(),
            name: "Test".to_string(),
            address: String::new(),
            location: None,
            rating,
            price_level,
            image: None,
            types: vec![],
        }
    }

    #[test]
    fn test_distance_score_endpoints() {
        assert_eq!(distance_score(0.0), 1.0);
        assert_eq!(distance_score(5.0), 0.0);
        assert_eq!(distance_score(12.0), 0.0);
        assert!((distance_score(2.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_score_is_non_increasing() {
        let mut previous = distance_score(0.0);
        for step in 1..=80 {
            let current = distance_score(step as f64 * 0.1);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_rating_score_is_rating_over_five() {
        assert_eq!(rating_score(4.5), 0.9);
        assert_eq!(rating_score(5.0), 1.0);
        assert_eq!(rating_score(0.0), 0.0);
    }

    #[test]
    fn test_price_score_tiers() {
        assert_eq!(price_score(Some(1)), 1.0);
        assert_eq!(price_score(Some(3)), 0.5);
        assert_eq!(price_score(Some(5)), 0.0);
    }

    #[test]
    fn test_missing_price_defaults_to_cheapest() {
        assert_eq!(price_score(None), price_score(Some(1)));
        assert_eq!(price_score(Some(0)), 1.0);
    }

    #[test]
    fn test_extreme_price_tiers_do_not_overflow() {
        assert!(price_score(Some(i32::MIN)).is_finite());
        assert!(price_score(Some(i32::MAX)).is_finite());
        assert!(price_score(Some(i32::MIN)) > 1.0);
    }

    #[test]
    fn test_weighted_score_at_user_position() {
        let here = Coordinate {
            latitude: 25.033,
            longitude: 121.5654,
        };
        let (score, distance) = recommendation_score(&restaurant(4.5, Some(2)), here, here);
        assert_eq!(distance, 0.0);
        // 0.4 * 1.0 + 0.4 * 0.9 + 0.2 * 0.75
        assert!((score - 0.91).abs() < 1e-12);
    }

    #[test]
    fn test_far_restaurant_keeps_rating_and_price_credit() {
        let user = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let far = Coordinate {
            latitude: 1.0,
            longitude: 0.0,
        };
        let (score, distance) = recommendation_score(&restaurant(5.0, None), far, user);
        assert!(distance > MAX_USEFUL_DISTANCE_KM);
        assert!((score - 0.6).abs() < 1e-12);
    }
}
