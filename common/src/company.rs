//! # Company Model
//!
//! The only entity in the system. Records are produced wholesale by the AI
//! service and never mutated afterwards, only appended to a result list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Development stage of a company or project.
///
/// The four named stages are the ones a user can filter on. The AI is free to
/// answer with anything else, which is kept verbatim in [`CompanyStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyStatus {
    Established,
    UnderDevelopment,
    AboutToStart,
    ProposedInvestment,
    Other(String),
}

impl CompanyStatus {
    /// Statuses offered as search filters, in display order.
    pub fn selectable() -> [CompanyStatus; 4] {
        [
            CompanyStatus::Established,
            CompanyStatus::UnderDevelopment,
            CompanyStatus::AboutToStart,
            CompanyStatus::ProposedInvestment,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompanyStatus::Established => "Established",
            CompanyStatus::UnderDevelopment => "Under Development",
            CompanyStatus::AboutToStart => "About to Start",
            CompanyStatus::ProposedInvestment => "Proposed Investment",
            CompanyStatus::Other(raw) => raw,
        }
    }

    /// Parses user input into one of the selectable statuses.
    ///
    /// Accepts the display name in any case, with `-` or `_` in place of spaces.
    pub fn parse_selectable(s: &str) -> Result<Self, String> {
        match CompanyStatus::from_str(s) {
            Ok(CompanyStatus::Other(raw)) => {
                let selectable = Self::selectable();
                let expected: Vec<&str> = selectable.iter().map(|status| status.as_str()).collect();
                Err(format!(
                    "unknown status '{raw}', expected one of: {}",
                    expected.join(", ")
                ))
            }
            Ok(status) => Ok(status),
            Err(e) => match e {},
        }
    }
}

impl FromStr for CompanyStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_ascii_lowercase();

        let status = match normalized.as_str() {
            "established" => CompanyStatus::Established,
            "under development" => CompanyStatus::UnderDevelopment,
            "about to start" => CompanyStatus::AboutToStart,
            "proposed investment" => CompanyStatus::ProposedInvestment,
            _ => CompanyStatus::Other(s.trim().to_string()),
        };
        Ok(status)
    }
}

impl From<String> for CompanyStatus {
    fn from(value: String) -> Self {
        match CompanyStatus::from_str(&value) {
            Ok(status) => status,
            Err(e) => match e {},
        }
    }
}

impl From<CompanyStatus> for String {
    fn from(value: CompanyStatus) -> Self {
        match value {
            CompanyStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headcount as reported by the AI: a plain number or free text like `"500+"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmployeeCount {
    Count(u64),
    Text(String),
}

impl fmt::Display for EmployeeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeCount::Count(count) => write!(f, "{count}"),
            EmployeeCount::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default = "unknown_status", deserialize_with = "lenient_status")]
    pub status: CompanyStatus,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub investment: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub google_maps_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_count: Option<EmployeeCount>,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub established_year: Option<i32>,
}

impl Company {
    pub fn new(name: impl Into<String>, status: CompanyStatus) -> Self {
        Self {
            name: name.into(),
            status,
            location: String::new(),
            description: String::new(),
            investment: None,
            website: None,
            google_maps_url: None,
            employee_count: None,
            established_year: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Key used to recognise the same company across result pages.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Filters out placeholders the AI uses for missing data.
    pub fn known(value: Option<&str>) -> Option<&str> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("n/a"))
    }

    pub fn known_employee_count(&self) -> Option<String> {
        let count = self.employee_count.as_ref()?.to_string();
        Company::known(Some(count.as_str())).map(str::to_string)
    }
}

fn unknown_status() -> CompanyStatus {
    CompanyStatus::Other(String::new())
}

/// Any JSON scalar the AI may put where a string or number is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(text) => text,
        }
    }
}

/// `null` becomes an empty string, numbers are stringified.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_text(deserializer)?.unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<CompanyStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CompanyStatus::from(lenient_text(deserializer)?))
}

/// Accepts `1200`, `1200.0`, `"500+"` and `null`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<EmployeeCount>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<Scalar>::deserialize(deserializer)?.map(|raw| match raw {
        Scalar::Int(n) if n >= 0 => EmployeeCount::Count(n.unsigned_abs()),
        Scalar::Float(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
            EmployeeCount::Count(f as u64)
        }
        other => EmployeeCount::Text(other.into_text()),
    });
    Ok(count)
}

/// Accepts `2004`, `2004.0`, `"2004"`, `null` and placeholders like `"N/A"`.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => i32::try_from(n).ok(),
        Some(Scalar::Float(f)) if f.fract() == 0.0 => Some(f as i32),
        Some(Scalar::Text(text)) => text.trim().parse::<i32>().ok(),
        Some(_) | None => None,
    };
    Ok(year)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient_about_case_and_separators() {
        assert_eq!(
            "under-development".parse::<CompanyStatus>(),
            Ok(CompanyStatus::UnderDevelopment)
        );
        assert_eq!(
            "PROPOSED_INVESTMENT".parse::<CompanyStatus>(),
            Ok(CompanyStatus::ProposedInvestment)
        );
        assert_eq!(
            "Expanding".parse::<CompanyStatus>(),
            Ok(CompanyStatus::Other("Expanding".to_string()))
        );
    }

    #[test]
    fn parse_selectable_rejects_free_text() {
        assert_eq!(
            CompanyStatus::parse_selectable("about to start"),
            Ok(CompanyStatus::AboutToStart)
        );
        let err = CompanyStatus::parse_selectable("bankrupt").unwrap_err();
        assert!(err.contains("bankrupt"));
        assert!(err.contains("Proposed Investment"));
    }

    #[test]
    fn deserializes_full_record() {
        let raw = r#"{
            "name": "Acme Fabs",
            "status": "Under Development",
            "location": "Hyderabad, Telangana",
            "description": "Builds a 28nm fab.",
            "investment": "$2.5B",
            "website": "https://acme.example",
            "googleMapsUrl": "https://maps.example/acme",
            "employeeCount": 1200,
            "establishedYear": 2019
        }"#;

        let company: Company = serde_json::from_str(raw).unwrap();
        assert_eq!(company.name, "Acme Fabs");
        assert_eq!(company.status, CompanyStatus::UnderDevelopment);
        assert_eq!(company.employee_count, Some(EmployeeCount::Count(1200)));
        assert_eq!(company.established_year, Some(2019));
        assert_eq!(
            company.google_maps_url.as_deref(),
            Some("https://maps.example/acme")
        );
    }

    #[test]
    fn deserializes_loose_record() {
        let raw = r#"{
            "name": "Beta Semi",
            "status": "Scaling up",
            "employeeCount": "500+",
            "establishedYear": "2004",
            "website": "N/A"
        }"#;

        let company: Company = serde_json::from_str(raw).unwrap();
        assert_eq!(company.status, CompanyStatus::Other("Scaling up".into()));
        assert_eq!(company.location, "");
        assert_eq!(
            company.employee_count,
            Some(EmployeeCount::Text("500+".into()))
        );
        assert_eq!(company.established_year, Some(2004));
        assert_eq!(Company::known(company.website.as_deref()), None);
    }

    #[test]
    fn null_year_is_none() {
        let company: Company =
            serde_json::from_str(r#"{"name": "X", "establishedYear": null}"#).unwrap();
        assert_eq!(company.established_year, None);

        let company: Company =
            serde_json::from_str(r#"{"name": "X", "establishedYear": "N/A"}"#).unwrap();
        assert_eq!(company.established_year, None);
    }

    #[test]
    fn null_and_numeric_fields_are_tolerated() {
        let raw = r#"{
            "name": "Epsilon",
            "status": null,
            "location": null,
            "description": null,
            "investment": 2500000000,
            "website": null,
            "employeeCount": 1200.0,
            "establishedYear": 2011.0
        }"#;

        let company: Company = serde_json::from_str(raw).unwrap();
        assert_eq!(company.status, CompanyStatus::Other(String::new()));
        assert_eq!(company.location, "");
        assert_eq!(company.description, "");
        assert_eq!(company.investment.as_deref(), Some("2500000000"));
        assert_eq!(company.website, None);
        assert_eq!(company.employee_count, Some(EmployeeCount::Count(1200)));
        assert_eq!(company.established_year, Some(2011));

        let company: Company =
            serde_json::from_str(r#"{"name": "Zeta", "employeeCount": 12.5}"#).unwrap();
        assert_eq!(
            company.employee_count,
            Some(EmployeeCount::Text("12.5".into()))
        );
    }

    #[test]
    fn serializes_with_wire_names() {
        let company = Company::new("Gamma", CompanyStatus::AboutToStart)
            .with_website("https://gamma.example");
        let value = serde_json::to_value(&company).unwrap();
        assert_eq!(value["status"], "About to Start");
        assert_eq!(value["website"], "https://gamma.example");
        assert!(value.get("googleMapsUrl").is_none());
    }

    #[test]
    fn name_key_ignores_case_and_padding() {
        let a = Company::new("  Acme Fabs ", CompanyStatus::Established);
        let b = Company::new("ACME FABS", CompanyStatus::Established);
        assert_eq!(a.name_key(), b.name_key());
    }

    #[test]
    fn known_employee_count_hides_placeholders() {
        let mut company = Company::new("Delta", CompanyStatus::Established);
        company.employee_count = Some(EmployeeCount::Text("n/a".into()));
        assert_eq!(company.known_employee_count(), None);
        company.employee_count = Some(EmployeeCount::Count(40));
        assert_eq!(company.known_employee_count(), Some("40".to_string()));
    }
}
