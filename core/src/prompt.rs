//! Prompt construction for the company listing request.

use compass_common::query::SearchQuery;

/// Shape every object in the returned array must follow.
const COMPANY_SCHEMA: &str = r#"{
  "name": "string", // The full name of the company or project.
  "status": "string", // The current development status (e.g., Established, Under Development).
  "location": "string", // The city and state/country of the company.
  "description": "string", // A brief one-sentence summary of what the company does or the project entails.
  "investment": "string", // Proposed or known investment amount, if applicable. 'N/A' if unknown.
  "website": "string", // The official, real, and working website URL. 'N/A' if not found.
  "googleMapsUrl": "string", // A direct Google Maps URL for the company's location. 'N/A' if not applicable.
  "employeeCount": "string | number", // The estimated number of employees. 'N/A' if unknown.
  "establishedYear": "number | null" // The year the company was established. null if unknown.
}"#;

pub const SEARCH_RADIUS_KM: u32 = 200;
pub const SEED: i32 = 42;
pub const DEEP_SEARCH_THINKING_BUDGET: u32 = 32_768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    Standard,
    DeepSearch,
}

impl ModelChoice {
    pub fn for_query(query: &SearchQuery) -> Self {
        if query.deep_search {
            ModelChoice::DeepSearch
        } else {
            ModelChoice::Standard
        }
    }

    pub fn model_name(self) -> &'static str {
        match self {
            ModelChoice::Standard => "gemini-2.5-flash",
            ModelChoice::DeepSearch => "gemini-2.5-pro",
        }
    }

    pub fn thinking_budget(self) -> Option<u32> {
        match self {
            ModelChoice::Standard => None,
            ModelChoice::DeepSearch => Some(DEEP_SEARCH_THINKING_BUDGET),
        }
    }
}

/// Builds the instructions for one page of results.
///
/// `existing_names` are companies already shown to the user; when non-empty the
/// model is told to leave them out so "load more" yields a fresh page.
pub fn build_prompt(query: &SearchQuery, existing_names: &[String]) -> String {
    let mut prompt = format!(
        "Based on real-world, verifiable public data from Google Search and Google Maps, \
         generate a list of real companies in the \"{domain}\" industry within a \
         {SEARCH_RADIUS_KM}km radius of \"{location}\".\n\
         Only include companies with the following statuses: {statuses}.\n\
         For each company, provide its details, including the number of employees and the \
         year it was established. The website URL must be a real, working link. \
         Do not invent any information.\n",
        domain = query.domain.trim(),
        location = query.location,
        statuses = query.statuses_label(),
    );

    if !existing_names.is_empty() {
        prompt.push_str(&exclusion_block(existing_names));
    }

    prompt.push_str(
        "Return the result as a valid JSON array of objects. \
         Each object in the array must conform to the following structure:\n",
    );
    prompt.push_str(COMPANY_SCHEMA);
    prompt.push_str("\nIf no new companies are found, return an empty array [].\n");
    prompt
}

fn exclusion_block(existing_names: &[String]) -> String {
    let listed: String = existing_names
        .iter()
        .map(|name| format!("- {name}\n"))
        .collect();

    format!(
        "Please provide a new set of companies. CRUCIALLY, DO NOT include any of the \
         following companies that have already been listed:\n{listed}"
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
