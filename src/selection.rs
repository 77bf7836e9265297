//! Tiered candidate selection with progressive relaxation

use crate::catalog::Catalog;
use crate::error::{RecommendError, RecommendResult};
use crate::types::*;
use std::cmp::Ordering;
use tracing::{debug, info};

/// A tier must yield at least this many rows to stop the cascade
pub const MIN_CANDIDATES: usize = 2;

/// Row cap for the global top-rated tier
pub const GLOBAL_TOP_K: usize = 50;

/// One stage of the fallback cascade, each more permissive than the last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Exact,
    CityAndRating,
    GlobalTopRated,
}

impl Tier {
    pub const CASCADE: [Tier; 3] = [Tier::Exact, Tier::CityAndRating, Tier::GlobalTopRated];

    pub fn status(self) -> MatchStatus {
        match self {
            Tier::Exact => MatchStatus::Exact,
            Tier::CityAndRating => MatchStatus::RelaxedToCity,
            Tier::GlobalTopRated => MatchStatus::GlobalFallback,
        }
    }

    /// Message surfaced to the caller when the cascade falls into this tier
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Tier::Exact => None,
            Tier::CityAndRating => Some("Not enough cuisine matches. Showing top restaurants in city."),
            Tier::GlobalTopRated => Some("Not enough restaurants. Showing top rated overall."),
        }
    }

    /// Row positions this tier keeps, in output order
    pub fn select(self, catalog: &Catalog, criteria: &SelectionCriteria<'_>) -> Vec<usize> {
        match self {
            Tier::Exact => {
                let cuisine_col = catalog.encoded().column(criteria.cuisine);
                filter_positions(catalog, |pos, r| {
                    in_city_above_rating(r, criteria)
                        && cuisine_col.and_then(|c| catalog.encoded().value(pos, c)) == Some(1.0)
                })
            }
            Tier::CityAndRating => filter_positions(catalog, |_, r| in_city_above_rating(r, criteria)),
            Tier::GlobalTopRated => top_rated(catalog, GLOBAL_TOP_K),
        }
    }
}

fn in_city_above_rating(r: &Restaurant, criteria: &SelectionCriteria<'_>) -> bool {
    r.city.as_deref() == Some(criteria.city)
        && r.rating.map_or(false, |rating| rating >= criteria.min_rating)
}

fn filter_positions<F>(catalog: &Catalog, keep: F) -> Vec<usize>
where
    F: Fn(usize, &Restaurant) -> bool,
{
    catalog
        .restaurants()
        .iter()
        .enumerate()
        .filter(|(pos, r)| keep(*pos, *r))
        .map(|(pos, _)| pos)
        .collect()
}

/// Highest rated rows first; stable, missing or non-finite ratings last
fn top_rated(catalog: &Catalog, k: usize) -> Vec<usize> {
    let restaurants = catalog.restaurants();
    let mut positions: Vec<usize> = (0..restaurants.len()).collect();

    let rating = |pos: usize| restaurants[pos].rating.filter(|r| r.is_finite());

    positions.sort_by(|&a, &b| match (rating(a), rating(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    positions.truncate(k);
    positions
}

/// Rows surviving the cascade, eligible for ranking
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub tier: Tier,
    /// Row positions into the catalog, shared by both tables
    pub positions: Vec<usize>,
    pub notices: Vec<String>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Run the cascade until a tier yields enough rows
pub fn select_candidates(
    catalog: &Catalog,
    criteria: &SelectionCriteria<'_>,
) -> RecommendResult<CandidateSet> {
    let mut notices = Vec::new();
    let mut found = 0;

    for tier in Tier::CASCADE {
        if let Some(notice) = tier.notice() {
            info!("Relaxing to {:?}: {}", tier, notice);
            notices.push(notice.to_string());
        }

        let positions = tier.select(catalog, criteria);
        debug!("  {:?} kept {} rows", tier, positions.len());
        found = positions.len();

        if positions.len() >= MIN_CANDIDATES {
            return Ok(CandidateSet {
                tier,
                positions,
                notices,
            });
        }
    }

    Err(RecommendError::InsufficientCandidates { found })
}
