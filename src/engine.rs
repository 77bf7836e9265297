//! Recommender: validates a query, selects candidates and ranks them

use crate::catalog::Catalog;
use crate::error::{RecommendError, RecommendResult};
use crate::ranking::rank_neighbors;
use crate::selection::select_candidates;
use crate::types::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Main recommendation engine (thread-safe via Arc)
pub struct Recommender {
    catalog: Arc<Catalog>,
}

pub type SharedRecommender = Arc<Recommender>;

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> SharedRecommender {
        Arc::new(Self { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cities(&self) -> &[String] {
        self.catalog.cities()
    }

    pub fn cuisines(&self) -> &[String] {
        self.catalog.cuisines()
    }

    /// Main entry point: answer one query against the catalog
    pub fn recommend(&self, query: &RecommendQuery) -> RecommendResult<RecommendResponse> {
        let start = Instant::now();

        info!(
            "Recommending: city='{}', cuisine='{}', min_rating={}, top_n={}",
            query.city, query.cuisine, query.min_rating, query.top_n
        );

        self.validate(query)?;

        // Step 1: Cascade down to a usable candidate set
        let criteria = SelectionCriteria {
            city: &query.city,
            cuisine: &query.cuisine,
            min_rating: query.min_rating,
        };
        let candidates = select_candidates(&self.catalog, &criteria).map_err(|e| {
            warn!("Selection failed: {}", e);
            e
        })?;

        info!("Found {} restaurants ({:?})", candidates.len(), candidates.tier);

        // Step 2: Materialize both tables from one row selection
        let (restaurants, features) = self.catalog.take(&candidates.positions);

        // Step 3: Rank around the first candidate
        let neighbors = rank_neighbors(&features, query.top_n);

        let recommendations: Vec<RecommendedRestaurant> = neighbors
            .iter()
            .map(|n| RecommendedRestaurant {
                restaurant: restaurants[n.position].clone(),
                distance: n.distance,
            })
            .collect();

        info!(
            "Recommendation complete: {} results in {}us",
            recommendations.len(),
            start.elapsed().as_micros()
        );

        Ok(RecommendResponse {
            status: candidates.tier.status(),
            notices: candidates.notices,
            candidates_found: candidates.positions.len(),
            recommendations,
        })
    }

    fn validate(&self, query: &RecommendQuery) -> RecommendResult<()> {
        if query.top_n == 0 {
            return Err(RecommendError::InvalidQuery(
                "top_n must be at least 1".to_string(),
            ));
        }
        if !query.min_rating.is_finite() {
            return Err(RecommendError::InvalidQuery(format!(
                "min_rating must be a finite number, got {}",
                query.min_rating
            )));
        }
        if !self.catalog.has_cuisine(&query.cuisine) {
            return Err(RecommendError::UnknownCuisine(query.cuisine.clone()));
        }
        Ok(())
    }
}
