//! continent_explorer
//!
//! Browse continents and the countries on them. Pairs with the `continents` CLI and the
//! `continents-gui` desktop app.
//!
//! ### Features
//! - Bundled continent and country tables, or your own JSON tables
//! - Continent search and selection with aggregate statistics
//! - Optional enrichment of every listed country with capital and flag from REST Countries
//! - Export the country listing as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use continent_explorer::{Client, Dataset, Explorer, Mode};
//!
//! let mut explorer = Explorer::new(Dataset::bundled()?, Mode::Enriched);
//! explorer.select_blocking("SA", &Client::default());
//! println!("{}", continent_explorer::render::render_text(&explorer, "en"));
//! continent_explorer::storage::save_csv(explorer.countries(), "south_america.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod dataset;
pub mod explorer;
pub mod format;
pub mod models;
pub mod render;
pub mod selection;
pub mod stats;
pub mod storage;

pub use api::{Client, CountryLookup, EnrichError};
pub use dataset::{Dataset, DatasetError};
pub use explorer::{BatchOutcome, BatchRequest, Explorer, Mode, View};
pub use models::{Continent, Country, CountryEntry, EnrichedCountry};
