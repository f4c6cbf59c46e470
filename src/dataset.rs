//! The continent and country tables.
//!
//! Both tables ship inside the binary (`data/continents.json`, `data/countries.json`)
//! and are parsed once at startup. Alternative tables can be loaded from disk with
//! [`Dataset::load`].

use crate::models::{Continent, Country};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_CONTINENTS: &str = include_str!("../data/continents.json");
const BUNDLED_COUNTRIES: &str = include_str!("../data/countries.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate continent code {0:?}")]
    DuplicateContinent(String),

    #[error("duplicate country code {0:?}")]
    DuplicateCountry(String),
}

/// In-memory continent and country tables, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    continents: Vec<Continent>,
    countries: Vec<Country>,
}

impl Dataset {
    /// Build from already-parsed tables. Codes must be unique within each table;
    /// a country's `continent` is not checked against the continent table.
    pub fn new(continents: Vec<Continent>, countries: Vec<Country>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for c in &continents {
            if !seen.insert(c.code.as_str()) {
                return Err(DatasetError::DuplicateContinent(c.code.clone()));
            }
        }
        let mut seen = HashSet::new();
        for c in &countries {
            if !seen.insert(c.code.as_str()) {
                return Err(DatasetError::DuplicateCountry(c.code.clone()));
            }
        }
        Ok(Self {
            continents,
            countries,
        })
    }

    /// The tables compiled into the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_CONTINENTS, BUNDLED_COUNTRIES)
    }

    pub fn from_json(continents: &str, countries: &str) -> Result<Self, DatasetError> {
        let continents: Vec<Continent> =
            serde_json::from_str(continents).map_err(|source| DatasetError::Parse {
                table: "continent",
                source,
            })?;
        let countries: Vec<Country> =
            serde_json::from_str(countries).map_err(|source| DatasetError::Parse {
                table: "country",
                source,
            })?;
        Self::new(continents, countries)
    }

    /// Read both tables from JSON files.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        continents_path: P,
        countries_path: Q,
    ) -> Result<Self, DatasetError> {
        let read = |p: &Path| {
            std::fs::read_to_string(p).map_err(|source| DatasetError::Io {
                path: p.to_path_buf(),
                source,
            })
        };
        let continents = read(continents_path.as_ref())?;
        let countries = read(countries_path.as_ref())?;
        let ds = Self::from_json(&continents, &countries)?;
        log::debug!(
            "loaded {} continents and {} countries from disk",
            ds.continents.len(),
            ds.countries.len()
        );
        Ok(ds)
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Linear lookup by exact code.
    pub fn continent(&self, code: &str) -> Option<&Continent> {
        self.continents.iter().find(|c| c.code == code)
    }
}
