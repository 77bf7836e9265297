//! Core type definitions for restaurant recommendation

use serde::{Deserialize, Serialize};

/// Descriptive restaurant record, as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,         // typically 0.0-5.0
    #[serde(default)]
    pub cost: Option<f64>,           // currency units
    #[serde(default)]
    pub delivery_time: Option<f64>,  // minutes
    #[serde(default, alias = "address_clean")]
    pub address: Option<String>,
}

impl Restaurant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: None,
            cuisine: None,
            rating: None,
            cost: None,
            delivery_time: None,
            address: None,
        }
    }
}

/// Query parameters supplied by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendQuery {
    pub city: String,
    pub cuisine: String,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

pub fn default_min_rating() -> f64 {
    3.5
}

pub fn default_top_n() -> usize {
    5
}

impl RecommendQuery {
    pub fn new(city: impl Into<String>, cuisine: impl Into<String>, min_rating: f64, top_n: usize) -> Self {
        Self {
            city: city.into(),
            cuisine: cuisine.into(),
            min_rating,
            top_n,
        }
    }
}

/// Filter criteria handed to the candidate selector
#[derive(Debug, Clone, Copy)]
pub struct SelectionCriteria<'a> {
    pub city: &'a str,
    pub cuisine: &'a str,
    pub min_rating: f64,
}

/// Which cascade tier produced the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Exact,          // city + cuisine + rating
    RelaxedToCity,  // city + rating
    GlobalFallback, // top rated overall
}

/// A ranked neighbour of the reference candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position within the candidate set
    pub position: usize,
    /// Cosine distance to the reference candidate
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub distance: f64,
}

/// Response from a recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub status: MatchStatus,
    pub notices: Vec<String>,
    pub candidates_found: usize,
    pub recommendations: Vec<RecommendedRestaurant>,
}
