//! # rf-directory
//!
//! The flagged-entity directory: people and companies with their flag
//! counts. Data is a read-only embedded fixture, loaded once per process
//! and never mutated. Lookup is a case-insensitive substring filter over
//! names and titles/industries; there is no ranking.

use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use rf_core::directory::{FlaggedCompany, FlaggedPerson};

static BUILTIN: OnceLock<Directory> = OnceLock::new();

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory fixture parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The flagged-entity directory.
#[derive(Debug, Deserialize)]
pub struct Directory {
    people: Vec<FlaggedPerson>,
    companies: Vec<FlaggedCompany>,
}

/// Entities matching a directory query, grouped the way the dashboard tabs
/// present them.
#[derive(Debug)]
pub struct DirectoryMatches<'a> {
    pub people: Vec<&'a FlaggedPerson>,
    pub companies: Vec<&'a FlaggedCompany>,
}

impl Directory {
    /// The embedded fixture, parsed once per process.
    ///
    /// # Panics
    ///
    /// Panics if the embedded fixture is malformed (a packaging defect, not
    /// a runtime condition).
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_json(include_str!("../data/directory.json"))
                .expect("embedded directory fixture should parse")
        })
    }

    /// Parse a directory from JSON. Public for tests and alternate fixtures.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Parse` when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn people(&self) -> &[FlaggedPerson] {
        &self.people
    }

    #[must_use]
    pub fn companies(&self) -> &[FlaggedCompany] {
        &self.companies
    }

    /// Case-insensitive substring filter over names and titles/industries.
    ///
    /// An empty query matches everything, mirroring an empty search box.
    #[must_use]
    pub fn search(&self, query: &str) -> DirectoryMatches<'_> {
        let needle = query.trim().to_lowercase();

        let people = self
            .people
            .iter()
            .filter(|p| contains(&needle, &[p.name.as_str(), p.title.as_str()]))
            .collect();
        let companies = self
            .companies
            .iter()
            .filter(|c| contains(&needle, &[c.name.as_str(), c.industry.as_str()]))
            .collect();

        DirectoryMatches { people, companies }
    }
}

fn contains(needle: &str, haystacks: &[&str]) -> bool {
    needle.is_empty() || haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}
