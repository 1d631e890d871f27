//! # Discovery Session
//!
//! Holds the state behind one search: the query, the companies shown so far,
//! whether a request is running and whether the source looks exhausted.
//!
//! A session is driven by two operations:
//! 1. [`DiscoverySession::generate`] starts a fresh search and replaces the results.
//! 2. [`DiscoverySession::load_more`] asks for another page, excluding every
//!    name already listed, and appends what is new.

use std::collections::HashSet;

use compass_common::company::Company;
use compass_common::query::{QueryError, SearchQuery};
use tracing::{debug, warn};

use crate::error::DiscoveryError;
use crate::parser;
use crate::provider::{CompanyProvider, GenerationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    LoadingMore,
}

pub struct DiscoverySession {
    provider: Box<dyn CompanyProvider>,
    query: Option<SearchQuery>,
    companies: Vec<Company>,
    seen: HashSet<String>,
    has_more: bool,
    phase: Phase,
    last_error: Option<String>,
}

impl DiscoverySession {
    pub fn new(provider: Box<dyn CompanyProvider>) -> Self {
        Self {
            provider,
            query: None,
            companies: Vec::new(),
            seen: HashSet::new(),
            has_more: true,
            phase: Phase::Idle,
            last_error: None,
        }
    }

    /// Runs a new search, discarding previous results.
    ///
    /// Returns the number of companies found. An empty page marks the
    /// session as exhausted.
    pub async fn generate(&mut self, query: SearchQuery) -> Result<usize, DiscoveryError> {
        if let Err(e) = query.validate() {
            self.last_error = Some(e.to_string());
            return Err(e.into());
        }

        self.phase = Phase::Loading;
        self.last_error = None;
        self.companies.clear();
        self.seen.clear();
        self.has_more = true;
        self.query = Some(query);

        let result = self.fetch_page(&[]).await;
        self.phase = Phase::Idle;

        match result {
            Ok(page) => {
                let added = self.append_new(page);
                if added == 0 {
                    self.has_more = false;
                }
                Ok(added)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the next page, excluding names already listed.
    ///
    /// Returns how many companies were appended. Does nothing and returns `0`
    /// while a request is running, before the first search, or once the source
    /// is exhausted. A page with nothing new marks the session exhausted.
    /// On failure the accumulated results are kept.
    pub async fn load_more(&mut self) -> Result<usize, DiscoveryError> {
        if self.is_busy() || !self.has_more || self.query.is_none() {
            return Ok(0);
        }

        self.phase = Phase::LoadingMore;
        self.last_error = None;

        let existing_names: Vec<String> = self
            .companies
            .iter()
            .map(|company| company.name.clone())
            .collect();
        let result = self.fetch_page(&existing_names).await;
        self.phase = Phase::Idle;

        match result {
            Ok(page) => {
                let added = self.append_new(page);
                if added == 0 {
                    debug!("no new companies returned, marking results exhausted");
                    self.has_more = false;
                }
                Ok(added)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_page(&self, existing_names: &[String]) -> Result<Vec<Company>, DiscoveryError> {
        let query = self.query.as_ref().ok_or(QueryError::Incomplete)?;

        let request = GenerationRequest::from_query(query, existing_names);
        let completion = self.provider.complete(&request).await.map_err(|e| {
            warn!("{} request failed: {e}", self.provider.name());
            DiscoveryError::from(e)
        })?;

        debug!(
            "{} returned {} chars in {}ms",
            self.provider.name(),
            completion.text.len(),
            completion.duration_ms
        );

        parser::parse_companies(&completion.text)
    }

    /// Appends companies whose name has not been listed yet.
    fn append_new(&mut self, page: Vec<Company>) -> usize {
        let before = self.companies.len();
        for company in page {
            if company.name.trim().is_empty() {
                continue;
            }
            if self.seen.insert(company.name_key()) {
                self.companies.push(company);
            } else {
                debug!("dropping repeated company '{}'", company.name);
            }
        }
        self.companies.len() - before
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
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
