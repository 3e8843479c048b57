//! Apartment dataset lookup.
//!
//! The listings collaborator is a local CSV snapshot of rental listings,
//! loaded once at startup. Lookups filter by destination city (and state,
//! when the query carries one), apply the budget ceiling, and return the
//! cheapest rows first.

use std::path::Path;

use anyhow::Context;

use crate::models::listing::Listing;

#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

/// "Seattle, WA" -> ("seattle", "WA"); "Seattle" -> ("seattle", "").
fn normalize_city_state(input: &str) -> (String, String) {
    match input.split_once(',') {
        Some((city, state)) => (
            city.trim().to_lowercase(),
            state.trim().to_uppercase(),
        ),
        None => (input.trim().to_lowercase(), String::new()),
    }
}

impl ListingStore {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening listings dataset {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("reading listings dataset {}", path.display()))
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut listings = Vec::new();
        for record in csv_reader.deserialize() {
            let listing: Listing = record?;
            listings.push(listing);
        }
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Up to `max_results` listings in `destination_city` priced at or
    /// under `max_price`, cheapest first.
    pub fn find_top(
        &self,
        destination_city: &str,
        max_price: f64,
        max_results: usize,
    ) -> Vec<Listing> {
        let (city_filter, state_filter) = normalize_city_state(destination_city);

        let mut matches: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|listing| listing.city.trim().to_lowercase() == city_filter)
            .filter(|listing| {
                state_filter.is_empty() || listing.state.trim().to_uppercase() == state_filter
            })
            .filter(|listing| matches!(listing.valid_price(), Some(p) if p <= max_price))
            .collect();

        matches.sort_by(|a, b| {
            a.valid_price()
                .partial_cmp(&b.valid_price())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(max_results);
        matches.into_iter().cloned().collect()
    }
}
