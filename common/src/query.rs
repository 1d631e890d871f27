//! # Search Query Model
//!
//! Describes what the user is looking for:
//! * an industry or domain (e.g. `AI in Healthcare`),
//! * a location, either a place name or `latitude, longitude` coordinates,
//! * the company statuses to include,
//! * whether to use the slower, deeper model.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::company::CompanyStatus;

pub const DEFAULT_DOMAIN: &str = "Chip manufacturing";
pub const DEFAULT_LOCATION: &str = "Hyderabad, Telangana";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please fill in all fields and select at least one status.")]
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where to search around.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// A free-form place name like `San Francisco`.
    Place(String),
    /// A `latitude, longitude` pair, also passed to the map grounding tool.
    /// `text` is the input as typed and is what the prompt shows.
    Coordinates { point: Coordinates, text: String },
}

impl Location {
    /// Classifies user input.
    ///
    /// `"40.7128, -74.0060"` becomes [`Location::Coordinates`]: two decimals
    /// separated by a comma, whitespace allowed only after the comma.
    /// Anything else, blank input included, is a [`Location::Place`];
    /// [`SearchQuery::validate`] rejects the blank case.
    pub fn from_input(s: &str) -> Self {
        let trimmed = s.trim();
        match parse_coordinates(trimmed) {
            Some(point) => Location::Coordinates {
                point,
                text: trimmed.to_string(),
            },
            None => Location::Place(trimmed.to_string()),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Coordinates { point, .. } => Some(*point),
            Location::Place(_) => None,
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Location::from_input(s))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Place(name) => f.write_str(name),
            Location::Coordinates { text, .. } => f.write_str(text),
        }
    }
}

fn parse_coordinates(s: &str) -> Option<Coordinates> {
    let (lat_str, lon_str) = s.split_once(',')?;
    let lon_str = lon_str.trim_start();

    if !is_decimal(lat_str) || !is_decimal(lon_str) {
        return None;
    }

    Some(Coordinates {
        latitude: lat_str.parse().ok()?,
        longitude: lon_str.parse().ok()?,
    })
}

/// Matches `-?\d+(\.\d+)?`.
fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub domain: String,
    pub location: Location,
    pub statuses: Vec<CompanyStatus>,
    /// Use the larger model with an extended thinking budget.
    pub deep_search: bool,
}

impl SearchQuery {
    pub fn new(
        domain: impl Into<String>,
        location: Location,
        statuses: Vec<CompanyStatus>,
    ) -> Self {
        Self {
            domain: domain.into(),
            location,
            statuses,
            deep_search: false,
        }
    }

    pub fn with_deep_search(mut self, deep_search: bool) -> Self {
        self.deep_search = deep_search;
        self
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        let blank_location = matches!(&self.location, Location::Place(name) if name.trim().is_empty());
        if self.domain.trim().is_empty() || blank_location || self.statuses.is_empty() {
            return Err(QueryError::Incomplete);
        }
        Ok(())
    }

    /// Selected statuses joined for display and prompting.
    pub fn statuses_label(&self) -> String {
        self.statuses
            .iter()
            .map(CompanyStatus::as_str)
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(
            DEFAULT_DOMAIN,
            Location::Place(DEFAULT_LOCATION.to_string()),
            vec![CompanyStatus::ProposedInvestment],
        )
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
