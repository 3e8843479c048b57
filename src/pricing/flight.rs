//! Flight fare band table.
//!
//! Rows are `(band_min_miles, band_max_miles, carrier, cost_per_mile)` with
//! the band max inclusive; several carriers usually serve the same band, so
//! a single trip distance matches multiple rows and every match is
//! surfaced. A distance matching no row means flight pricing is
//! unavailable, not free.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FlightBandRow {
    pub band_min_miles: f64,
    pub band_max_miles: f64,
    pub carrier: String,
    pub cost_per_mile: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FlightBandTable {
    rows: Vec<FlightBandRow>,
}

impl FlightBandTable {
    pub fn from_csv_path(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening flight band table {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("reading flight band table {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let row: FlightBandRow = record?;
            if row.band_max_miles < row.band_min_miles {
                anyhow::bail!(
                    "flight band {}-{} has max below min",
                    row.band_min_miles,
                    row.band_max_miles
                );
            }
            if row.cost_per_mile < 0.0 {
                anyhow::bail!("carrier {} has a negative cost-per-mile", row.carrier);
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Every row whose band contains `miles` (max inclusive).
    pub fn matches(&self, miles: f64) -> Vec<&FlightBandRow> {
        self.rows
            .iter()
            .filter(|row| miles >= row.band_min_miles && miles <= row.band_max_miles)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
band_min_miles,band_max_miles,carrier,cost_per_mile
0,499,Southwest Airlines,0.3188
0,499,Delta Air Lines,0.3742
500,999,Southwest Airlines,0.2280
500,999,Delta Air Lines,0.2676
";

    #[test]
    fn test_multiple_carriers_match_one_band() {
        let table = FlightBandTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);

        let matches = table.matches(250.0);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().any(|r| r.carrier == "Southwest Airlines"));
        assert!(matches.iter().any(|r| r.carrier == "Delta Air Lines"));
    }

    #[test]
    fn test_band_max_is_inclusive() {
        let table = FlightBandTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.matches(499.0).len(), 2);
        assert_eq!(table.matches(499.5).len(), 0);
        assert_eq!(table.matches(500.0).len(), 2);
    }

    #[test]
    fn test_out_of_band_distance_matches_nothing() {
        let table = FlightBandTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(table.matches(5000.0).is_empty());
    }

    #[test]
    fn test_rejects_inverted_band() {
        let bad = "band_min_miles,band_max_miles,carrier,cost_per_mile\n500,100,X,0.2\n";
        assert!(FlightBandTable::from_reader(bad.as_bytes()).is_err());
    }
}
