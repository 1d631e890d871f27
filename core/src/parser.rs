//! Decoding of the model's text answer into company records.

use compass_common::company::Company;

use crate::error::DiscoveryError;

/// Parses the model output as a JSON array of companies.
///
/// The model sometimes wraps its JSON in a markdown code fence; that is removed
/// first. Blank output means no companies.
pub fn parse_companies(text: &str) -> Result<Vec<Company>, DiscoveryError> {
    let json = strip_code_fence(text);
    if json.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<Company>>(json).map_err(DiscoveryError::InvalidFormat)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };

    inner.strip_suffix("```").unwrap_or(inner).trim()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
