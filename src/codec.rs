//! Move-request path codec.
//!
//! The boundary contract with the frontend is a REST path rather than a
//! body, so a user's selections travel as fixed-position segments:
//!
//! ```text
//! /{originSlug}/{destSlug}/{startMonth}/{endMonth}/{flags}/{transport}/{budget}
//! ```
//!
//! * city slug: lower-case, every non a-z character stripped
//!   ("Madison, WI" -> "madisonwi")
//! * month: full lower-case English month name, or the "unknown" sentinel
//! * flags: two bits, left to right: needs-moving-truck, wants-moving-help
//! * transport: six bits, one per mode in the order of
//!   [`TransportMode::ALL`]; needs-moving-truck forces "001000"
//! * budget: whole dollars
//!
//! Decoding converts the raw segments straight into a [`MoveQuery`]; bit
//! strings never travel past this module.

use std::collections::HashMap;

use crate::models::query::{MoveQuery, TransportMode, YearMonth};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month segment sentinel for an unknown or unconstrained date.
pub const UNKNOWN_MONTH: &str = "unknown";

/// Transport segment emitted whenever the needs-moving-truck flag is set,
/// regardless of any separately selected mode.
pub const TRUCK_TRANSPORT_SEGMENT: &str = "001000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("city segment must be lower-case letters, got '{0}'")]
    BadCity(String),
    #[error("month segment '{0}' is not a month name")]
    BadMonth(String),
    #[error("flags segment must be 2 characters of 0/1, got '{0}'")]
    BadFlags(String),
    #[error("transport segment must be 6 characters of 0/1, got '{0}'")]
    BadTransport(String),
    #[error("transport segment '{0}' selects more than one mode")]
    AmbiguousTransport(String),
    #[error("budget segment must be a whole dollar amount, got '{0}'")]
    BadBudget(String),
}

/// Lower-case a place name and strip everything outside a-z.
pub fn city_slug(place: &str) -> String {
    place
        .chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Full lower-case English name for a month in 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Inverse of [`month_name`].
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

fn month_segment(ym: Option<YearMonth>) -> &'static str {
    ym.and_then(|ym| month_name(ym.month)).unwrap_or(UNKNOWN_MONTH)
}

fn bit(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

/// Encode a query into the request path, leading slash included.
pub fn encode(query: &MoveQuery) -> String {
    let transport: String = if query.needs_moving_truck {
        TRUCK_TRANSPORT_SEGMENT.to_string()
    } else {
        TransportMode::ALL
            .iter()
            .map(|mode| bit(query.transport == Some(*mode)))
            .collect()
    };

    format!(
        "/{}/{}/{}/{}/{}{}/{}/{}",
        city_slug(&query.origin),
        city_slug(&query.destination),
        month_segment(query.start),
        month_segment(query.end),
        bit(query.needs_moving_truck),
        bit(query.wants_moving_help),
        transport,
        query.housing_budget,
    )
}

fn decode_city(segment: &str) -> Result<String, DecodeError> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(DecodeError::BadCity(segment.to_string()));
    }
    Ok(segment.to_string())
}

fn decode_month(segment: &str) -> Result<Option<u32>, DecodeError> {
    if segment == UNKNOWN_MONTH {
        return Ok(None);
    }
    month_from_name(segment)
        .map(Some)
        .ok_or_else(|| DecodeError::BadMonth(segment.to_string()))
}

fn decode_bits<const N: usize, F>(segment: &str, err: F) -> Result<[bool; N], DecodeError>
where
    F: Fn(String) -> DecodeError,
{
    let chars: Vec<char> = segment.chars().collect();
    if chars.len() != N || chars.iter().any(|c| *c != '0' && *c != '1') {
        return Err(err(segment.to_string()));
    }
    let mut bits = [false; N];
    for (i, c) in chars.iter().enumerate() {
        bits[i] = *c == '1';
    }
    Ok(bits)
}

/// Decode the seven path segments into a [`MoveQuery`].
///
/// The month segments carry no year, so `reference_year` anchors the start
/// month; an end month earlier in the calendar than the start rolls over to
/// the next year. Origin and destination come back as raw slugs — callers
/// map them to display names via a [`CityRegistry`].
#[allow(clippy::too_many_arguments)]
pub fn decode(
    origin: &str,
    destination: &str,
    start_month: &str,
    end_month: &str,
    flags: &str,
    transport: &str,
    budget: &str,
    reference_year: i32,
) -> Result<MoveQuery, DecodeError> {
    let origin = decode_city(origin)?;
    let destination = decode_city(destination)?;
    let start = decode_month(start_month)?;
    let end = decode_month(end_month)?;

    let [needs_moving_truck, wants_moving_help] =
        decode_bits::<2, _>(flags, DecodeError::BadFlags)?;

    let transport_bits = decode_bits::<6, _>(transport, DecodeError::BadTransport)?;
    let mut selected = TransportMode::ALL
        .iter()
        .zip(transport_bits.iter())
        .filter(|(_, set)| **set)
        .map(|(mode, _)| *mode);
    let mode = selected.next();
    if selected.next().is_some() {
        return Err(DecodeError::AmbiguousTransport(transport.to_string()));
    }
    // The truck flag supersedes whatever the transport segment says.
    let mode = if needs_moving_truck {
        Some(TransportMode::MovingTruck)
    } else {
        mode
    };

    let housing_budget: u32 = budget
        .parse()
        .map_err(|_| DecodeError::BadBudget(budget.to_string()))?;

    let start = start.map(|month| YearMonth {
        year: reference_year,
        month,
    });
    let end = end.map(|month| {
        let rolls_over = matches!(start, Some(s) if month < s.month);
        YearMonth {
            year: reference_year + i32::from(rolls_over),
            month,
        }
    });

    Ok(MoveQuery {
        origin,
        destination,
        start,
        end,
        transport: mode,
        needs_moving_truck,
        wants_moving_help,
        housing_budget,
    })
}

/// Maps known city slugs back to display names ("madisonwi" -> "Madison, WI").
/// Unknown slugs fall back to the raw slug, mirroring the upstream service.
#[derive(Debug, Clone, Default)]
pub struct CityRegistry {
    by_slug: HashMap<String, String>,
}

impl CityRegistry {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let by_slug = names
            .iter()
            .map(|name| (city_slug(name.as_ref()), name.as_ref().to_string()))
            .collect();
        Self { by_slug }
    }

    pub fn display_name(&self, slug: &str) -> String {
        self.by_slug
            .get(slug)
            .cloned()
            .unwrap_or_else(|| slug.to_string())
    }
}
