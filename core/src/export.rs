//! CSV export of accumulated results.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use compass_common::company::Company;
use tracing::debug;

pub const CSV_HEADERS: [&str; 9] = [
    "Name",
    "Status",
    "Location",
    "Description",
    "Investment",
    "Website",
    "Google Maps URL",
    "Employee Count",
    "Established Year",
];

/// `"AI in  Healthcare"` becomes `AI_in_Healthcare_companies.csv`.
///
/// Path separators and other characters file systems reject are replaced with
/// `_`, so the name always stays inside the export directory.
pub fn csv_file_name(domain: &str) -> String {
    let cleaned: String = domain
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    let stem: Vec<&str> = cleaned.split_whitespace().collect();
    format!("{}_companies.csv", stem.join("_"))
}

/// Writes the header and one row per company.
///
/// Fields are quoted only when they contain a comma, quote or line break.
/// Missing optional fields are written as bare empty cells (`,,`), not as a
/// quoted empty string.
pub fn write_csv<W: Write>(companies: &[Company], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for company in companies {
        wtr.write_record(to_record(company))?;
    }
    wtr.flush()?;
    Ok(())
}

fn to_record(company: &Company) -> [String; 9] {
    [
        company.name.clone(),
        company.status.to_string(),
        company.location.clone(),
        company.description.clone(),
        company.investment.clone().unwrap_or_default(),
        company.website.clone().unwrap_or_default(),
        company.google_maps_url.clone().unwrap_or_default(),
        company
            .employee_count
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        company
            .established_year
            .map(|year| year.to_string())
            .unwrap_or_default(),
    ]
}

/// Exports `companies` into `dir`, naming the file after the searched domain.
///
/// Returns `None` without touching the filesystem when there is nothing to export.
pub fn export_csv(companies: &[Company], domain: &str, dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    if companies.is_empty() {
        return Ok(None);
    }

    let path = dir.join(csv_file_name(domain));
    let file = File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(companies, file).with_context(|| format!("writing {}", path.display()))?;

    debug!("exported {} companies to {}", companies.len(), path.display());
    Ok(Some(path))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
