use colored::*;
use compass_common::company::{Company, CompanyStatus};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn status_color(status: &CompanyStatus) -> Color {
    match status {
        CompanyStatus::Established => colors::STATUS_ESTABLISHED,
        CompanyStatus::UnderDevelopment => colors::STATUS_UNDER_DEVELOPMENT,
        CompanyStatus::AboutToStart => colors::STATUS_ABOUT_TO_START,
        CompanyStatus::ProposedInvestment => colors::STATUS_PROPOSED_INVESTMENT,
        CompanyStatus::Other(_) => colors::SECONDARY,
    }
}

pub fn status_to_detail(status: &CompanyStatus) -> Detail {
    let label = match status {
        CompanyStatus::Other(raw) if raw.trim().is_empty() => "Unknown",
        _ => status.as_str(),
    };
    ("Status".to_string(), label.color(status_color(status)).bold())
}

/// Builds the tree rows shown under a company name.
///
/// Unknown values (missing, blank or `N/A`) are left out.
pub fn company_to_details(company: &Company) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![status_to_detail(&company.status)];

    if let Some(location) = Company::known(Some(company.location.as_str())) {
        details.push(("Place".to_string(), location.color(colors::TEXT_DEFAULT)));
    }

    if let Some(description) = Company::known(Some(company.description.as_str())) {
        details.push(("About".to_string(), description.normal()));
    }

    if let Some(investment) = Company::known(company.investment.as_deref()) {
        details.push(("Invest".to_string(), investment.color(colors::MONEY)));
    }

    if let Some(staff) = company.known_employee_count() {
        details.push(("Staff".to_string(), staff.color(colors::TEXT_DEFAULT)));
    }

    if let Some(year) = company.established_year {
        details.push(("Founded".to_string(), year.to_string().color(colors::TEXT_DEFAULT)));
    }

    if let Some(website) = Company::known(company.website.as_deref()) {
        details.push(("Web".to_string(), website.color(colors::LINK).underline()));
    }

    if let Some(maps) = Company::known(company.google_maps_url.as_deref()) {
        details.push(("Maps".to_string(), maps.color(colors::LINK)));
    }

    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
