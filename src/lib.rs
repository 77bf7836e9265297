//! tablematch - Restaurant Recommendation Engine
//!
//! Answers "where should I eat" queries against an in-memory restaurant table:
//! - Tiered candidate selection (city + cuisine + rating, then city + rating,
//!   then global top-rated)
//! - Per-candidate-set feature standardization
//! - Cosine nearest-neighbour ranking around a reference restaurant

pub mod types;
pub mod error;
pub mod catalog;
pub mod sources;
pub mod selection;
pub mod scoring;
pub mod ranking;
pub mod engine;
pub mod config;
pub mod server;

pub use types::*;
pub use error::{CatalogError, RecommendError, RecommendResult};
pub use catalog::{Catalog, EncodedTable};
pub use sources::{DatasetSource, HttpSource, JsonFileSource, StaticSource};
pub use selection::{select_candidates, CandidateSet, Tier};
pub use ranking::rank_neighbors;
pub use engine::{Recommender, SharedRecommender};
pub use config::{DatasetLocation, ServerConfig};
