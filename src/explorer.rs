//! Presentation state: which continent is selected, what the country list shows,
//! and whether an enrichment batch is in flight.
//!
//! The view is a single tagged value ([`View`]), so "loading" and "failed" can never
//! be true at once. Every selection bumps a generation counter; a batch result is only
//! applied if it carries the generation of the latest selection, so a slow batch for an
//! earlier click can't overwrite a newer one.

use crate::api::{self, CountryLookup, EnrichError};
use crate::dataset::Dataset;
use crate::models::{Continent, Country, CountryEntry, EnrichedCountry};
use crate::selection::{filter_continents, select_continent};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch country information. Please try again.";
pub const NO_DATA_MESSAGE: &str = "No data available for this continent.";

/// Whether selections are enriched from the country-info service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Static filter only; selection is synchronous.
    #[default]
    Plain,
    /// Filter, then fetch capital and flag for every country.
    Enriched,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Idle,
    Loading {
        continent: Continent,
        generation: u64,
    },
    Loaded {
        continent: Continent,
        countries: Vec<CountryEntry>,
    },
    Failed {
        continent: Continent,
        message: String,
    },
}

/// Work handed to whoever runs enrichment (a background thread, or inline in the CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub generation: u64,
    pub countries: Vec<Country>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub generation: u64,
    pub result: Result<Vec<EnrichedCountry>, EnrichError>,
}

impl BatchRequest {
    /// Run the batch against `lookup` and tag the outcome with this request's generation.
    pub fn run<L: CountryLookup + Sync + ?Sized>(&self, lookup: &L) -> BatchOutcome {
        BatchOutcome {
            generation: self.generation,
            result: api::enrich_batch(lookup, &self.countries),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Explorer {
    dataset: Dataset,
    mode: Mode,
    search_term: String,
    view: View,
    generation: u64,
}

impl Explorer {
    pub fn new(dataset: Dataset, mode: Mode) -> Self {
        Self {
            dataset,
            mode,
            search_term: String::new(),
            view: View::Idle,
            generation: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. The selection is cleared and any batch in flight becomes stale.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.generation += 1;
            self.view = View::Idle;
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Only narrows the continent buttons; the current selection is untouched.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Continents whose name matches the search term, in table order.
    pub fn visible_continents(&self) -> Vec<&Continent> {
        filter_continents(self.dataset.continents(), &self.search_term)
    }

    pub fn selected_continent(&self) -> Option<&Continent> {
        match &self.view {
            View::Idle => None,
            View::Loading { continent, .. }
            | View::Loaded { continent, .. }
            | View::Failed { continent, .. } => Some(continent),
        }
    }

    /// Rows of the country list. Empty unless the view is `Loaded`.
    pub fn countries(&self) -> &[CountryEntry] {
        match &self.view {
            View::Loaded { countries, .. } => countries,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.view {
            View::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Handle a click on a continent button.
    ///
    /// Returns the batch to run when the mode is `Enriched` and the continent has
    /// countries; in every other case the view is final when this returns.
    pub fn select(&mut self, code: &str) -> Option<BatchRequest> {
        self.generation += 1;
        let picked = select_continent(&self.dataset, code);
        let Some(continent) = picked.continent else {
            log::debug!("unknown continent code {:?}, clearing selection", code);
            self.view = View::Idle;
            return None;
        };

        match self.mode {
            Mode::Plain => {
                self.view = View::Loaded {
                    continent,
                    countries: picked.countries.into_iter().map(CountryEntry::Plain).collect(),
                };
                None
            }
            Mode::Enriched if picked.countries.is_empty() => {
                self.view = View::Failed {
                    continent,
                    message: NO_DATA_MESSAGE.to_string(),
                };
                None
            }
            Mode::Enriched => {
                log::debug!(
                    "enriching {} countries of {} (generation {})",
                    picked.countries.len(),
                    continent.code,
                    self.generation
                );
                self.view = View::Loading {
                    continent,
                    generation: self.generation,
                };
                Some(BatchRequest {
                    generation: self.generation,
                    countries: picked.countries,
                })
            }
        }
    }

    /// Apply a finished batch. Returns `false` if it was stale and got dropped.
    pub fn complete(&mut self, outcome: BatchOutcome) -> bool {
        let current = matches!(
            &self.view,
            View::Loading { generation, .. } if *generation == outcome.generation
        );
        if !current {
            log::debug!(
                "dropping stale batch (generation {}, current {})",
                outcome.generation,
                self.generation
            );
            return false;
        }
        let View::Loading { continent, .. } = std::mem::take(&mut self.view) else {
            return false;
        };
        self.view = match outcome.result {
            Ok(enriched) => View::Loaded {
                continent,
                countries: enriched.into_iter().map(CountryEntry::Enriched).collect(),
            },
            Err(err) => {
                log::warn!("enrichment of {} failed: {}", continent.code, err);
                View::Failed {
                    continent,
                    message: FETCH_FAILED_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    /// Select and, if needed, run the batch on the calling thread.
    pub fn select_blocking<L: CountryLookup + Sync + ?Sized>(&mut self, code: &str, lookup: &L) {
        if let Some(req) = self.select(code) {
            let outcome = req.run(lookup);
            self.complete(outcome);
        }
    }
}
