use std::collections::{HashMap, HashSet};

use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::{resolve_location, Coordinate, LocationResolution, Restaurant, ScoredRestaurant},
    services::{scoring::recommendation_score, sources::RestaurantSource},
};

/// Most restaurants returned for any one leading category
pub const MAX_PER_CATEGORY: usize = 3;

/// Bound of the per-request score offset, drawn from `[-0.1, 0.1]`
pub const PERTURBATION_BOUND: f64 = 0.1;

/// Fetches every candidate from `source` and picks a diversified recommendation set
///
/// An optional `keyword` narrows the candidates before scoring. A source
/// failure is returned as-is; no partial result is produced.
pub async fn recommend_restaurants(
    source: &dyn RestaurantSource,
    user: Coordinate,
    keyword: Option<&str>,
) -> AppResult<Vec<ScoredRestaurant>> {
    let mut candidates = source.fetch_all().await.map_err(|e| {
        tracing::error!(source = source.name(), error = %e, "Failed to fetch restaurant candidates");
        e
    })?;

    if let Some(keyword) = keyword {
        let before = candidates.len();
        candidates = filter_by_keyword(candidates, keyword);
        tracing::debug!(keyword, before, after = candidates.len(), "Applied keyword filter");
    }

    // Created after the last await so each request draws from its own thread-local generator
    let mut rng = rand::thread_rng();
    recommend(candidates, user, &mut rng)
}

/// Scores `candidates` around `user` and returns a shuffled, category-capped selection
///
/// Pipeline:
/// 1. Drop repeated ids and candidates whose location or rating is unusable
/// 2. Score each remaining candidate and add one shared random offset
/// 3. Keep the best-scoring half (rounded up)
/// 4. Shuffle, then keep at most [`MAX_PER_CATEGORY`] per leading category
/// 5. Shuffle the survivors again
pub fn recommend<R: Rng + ?Sized>(
    candidates: Vec<Restaurant>,
    user: Coordinate,
    rng: &mut R,
) -> AppResult<Vec<ScoredRestaurant>> {
    if !user.is_finite() {
        return Err(AppError::InvalidInput(
            "Invalid latitude or longitude values".to_string(),
        ));
    }

    let total = candidates.len();
    let eligible = resolve_candidates(candidates);
    let eligible_count = eligible.len();

    let mut scored = score_candidates(eligible, user);
    apply_shared_perturbation(&mut scored, rng);

    let mut top_half = select_top_half(scored);
    let top_half_count = top_half.len();
    top_half.shuffle(rng);

    let mut selected = cap_per_category(top_half, MAX_PER_CATEGORY);
    selected.shuffle(rng);

    tracing::debug!(
        total,
        eligible = eligible_count,
        top_half = top_half_count,
        selected = selected.len(),
        "Recommendation pipeline finished"
    );

    Ok(selected)
}

/// Keeps candidates whose name or any category tag contains `keyword`
///
/// Matching is case-insensitive. A blank keyword keeps everything.
pub fn filter_by_keyword(candidates: Vec<Restaurant>, keyword: &str) -> Vec<Restaurant> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|restaurant| {
            restaurant.name.to_lowercase().contains(&needle)
                || restaurant
                    .types
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Pairs each usable candidate with its normalized coordinate
///
/// The first occurrence of an id wins. Candidates without a resolvable
/// location or with a non-finite rating are logged and skipped.
fn resolve_candidates(candidates: Vec<Restaurant>) -> Vec<(Restaurant, Coordinate)> {
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut resolved = Vec::with_capacity(candidates.len());

    for restaurant in candidates {
        if !seen.insert(restaurant.id.clone()) {
            tracing::debug!(restaurant_id = %restaurant.id, "Skipping repeated restaurant id");
            continue;
        }

        if !restaurant.rating.is_finite() {
            tracing::warn!(
                restaurant_id = %restaurant.id,
                name = %restaurant.name,
                rating = restaurant.rating,
                "Invalid rating for restaurant, excluding from recommendations"
            );
            continue;
        }

        match resolve_location(restaurant.location.as_ref()) {
            LocationResolution::Resolved(coordinate) => resolved.push((restaurant, coordinate)),
            LocationResolution::Unresolved => {
                tracing::warn!(
                    restaurant_id = %restaurant.id,
                    name = %restaurant.name,
                    "Invalid location data for restaurant, excluding from recommendations"
                );
            }
        }
    }

    resolved
}

fn score_candidates(
    eligible: Vec<(Restaurant, Coordinate)>,
    user: Coordinate,
) -> Vec<ScoredRestaurant> {
    eligible
        .into_iter()
        .map(|(restaurant, coordinate)| {
            let (recommendation_score, distance_km) =
                recommendation_score(&restaurant, coordinate, user);
            ScoredRestaurant {
                restaurant,
                coordinate,
                distance_km,
                recommendation_score,
            }
        })
        .collect()
}

/// Adds one offset, shared by every candidate, to all scores
///
/// Relative order is unchanged; only the absolute magnitudes move.
fn apply_shared_perturbation<R: Rng + ?Sized>(scored: &mut [ScoredRestaurant], rng: &mut R) {
    let offset = rng.gen_range(-PERTURBATION_BOUND..=PERTURBATION_BOUND);
    for candidate in scored.iter_mut() {
        candidate.recommendation_score += offset;
    }
}

/// Sorts by descending score (stable on ties) and keeps `ceil(n / 2)`
fn select_top_half(mut scored: Vec<ScoredRestaurant>) -> Vec<ScoredRestaurant> {
    scored.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
    let keep = scored.len().div_ceil(2);
    scored.truncate(keep);
    scored
}

/// Walks `candidates` in order, keeping each one only while its category has room
fn cap_per_category(candidates: Vec<ScoredRestaurant>, cap: usize) -> Vec<ScoredRestaurant> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    candidates
        .into_iter()
        .filter(|candidate| {
            let count = counts
                .entry(candidate.restaurant.main_category().to_string())
                .or_insert(0);
            if *count < cap {
                *count += 1;
                true
            } else {
                false
            }
        })
        .collect()
}
