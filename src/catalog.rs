//! Immutable, row-aligned restaurant tables

use crate::error::CatalogError;
use crate::sources::DatasetSource;
use crate::types::Restaurant;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Encoded columns that are never cuisine indicators
pub const RESERVED_COLUMNS: [&str; 4] = ["rating", "cost", "delivery_time", "cluster"];

/// Numeric feature table, one row per restaurant.
///
/// Cells are optional: a missing value in the source data stays `None` and is
/// imputed by whoever reads it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Map<String, Value>>")]
pub struct EncodedTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<f64>>>,
}

impl EncodedTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<f64>>>) -> Result<Self, CatalogError> {
        let expected = columns.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(CatalogError::RaggedRow {
                row,
                expected,
                actual: values.len(),
            });
        }

        let index = index_columns(&columns);
        if index.len() != columns.len() {
            let mut seen = BTreeSet::new();
            if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(CatalogError::DuplicateColumn(dup.clone()));
            }
        }

        Ok(Self { columns, index, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Cell value; NaN and infinities read as missing
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    /// Every non-reserved column, sorted by name
    pub fn cuisine_columns(&self) -> Vec<String> {
        let mut cuisines: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !RESERVED_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect();
        cuisines.sort();
        cuisines
    }

    /// Rows at `positions`, in that order
    pub fn take(&self, positions: &[usize]) -> EncodedTable {
        EncodedTable {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: positions.iter().map(|&p| self.rows[p].clone()).collect(),
        }
    }
}

impl From<Vec<Map<String, Value>>> for EncodedTable {
    fn from(records: Vec<Map<String, Value>>) -> Self {
        let columns: Vec<String> = records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).and_then(json_number))
                    .collect()
            })
            .collect();

        let index = index_columns(&columns);

        Self { columns, index, rows }
    }
}

fn index_columns(columns: &[String]) -> HashMap<String, usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

fn json_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// The validated pair of descriptive and encoded tables.
///
/// Built once and shared read-only; queries only ever derive row positions
/// from it and materialize both tables through [`Catalog::take`].
#[derive(Debug, Clone)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    encoded: EncodedTable,
    cuisines: Vec<String>,
    cities: Vec<String>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>, encoded: EncodedTable) -> Result<Self, CatalogError> {
        if restaurants.len() != encoded.len() {
            return Err(CatalogError::MisalignedTables {
                restaurants: restaurants.len(),
                encoded: encoded.len(),
            });
        }

        let cuisines = encoded.cuisine_columns();
        if cuisines.is_empty() {
            return Err(CatalogError::NoCuisineColumns);
        }

        let cities = restaurants
            .iter()
            .filter_map(|r| r.city.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            restaurants,
            encoded,
            cuisines,
            cities,
        })
    }

    /// Load both tables from a source and validate them
    pub async fn load(source: &dyn DatasetSource) -> Result<Self> {
        debug!("Loading datasets from source '{}'", source.name());

        let (restaurants, encoded) =
            futures::try_join!(source.load_restaurants(), source.load_encoded())?;

        let catalog = Self::new(restaurants, encoded)?;

        info!(
            "Catalog loaded from '{}': {} restaurants, {} cities, {} cuisines",
            source.name(),
            catalog.len(),
            catalog.cities.len(),
            catalog.cuisines.len()
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn encoded(&self) -> &EncodedTable {
        &self.encoded
    }

    /// Sorted distinct non-missing cities
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Sorted cuisine indicator columns
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        self.cuisines.binary_search_by(|c| c.as_str().cmp(cuisine)).is_ok()
    }

    /// Apply one row selection to both tables
    pub fn take(&self, positions: &[usize]) -> (Vec<Restaurant>, EncodedTable) {
        let restaurants = positions.iter().map(|&p| self.restaurants[p].clone()).collect();
        (restaurants, self.encoded.take(positions))
    }
}
