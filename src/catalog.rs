//! Beam library loading
//!
//! The library is a JSON array of `{"Section", "MaxMoment", "Cost"}` objects.
//! It is read fresh for every optimization run and never mutated.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{OptimizerError, OptimizerResult};
use crate::models::CatalogSection;

/// Supplies the candidate sections for one optimization run
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> OptimizerResult<Vec<CatalogSection>>;

    /// Human-readable origin of the catalog, used in logs and health output
    fn describe(&self) -> String;
}

/// Catalog backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> OptimizerResult<Vec<CatalogSection>> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => OptimizerError::Configuration(format!(
                "beam library not found at {}",
                self.path.display()
            )),
            _ => OptimizerError::CatalogIo {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let sections = parse_catalog(&content)?;
        tracing::debug!(
            "Loaded {} sections from {}",
            sections.len(),
            self.path.display()
        );
        Ok(sections)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    sections: Vec<CatalogSection>,
}

impl StaticCatalog {
    pub fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }
}

impl CatalogSource for StaticCatalog {
    fn load(&self) -> OptimizerResult<Vec<CatalogSection>> {
        for (index, section) in self.sections.iter().enumerate() {
            validate_section(index, section)?;
        }
        Ok(self.sections.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} sections)", self.sections.len())
    }
}

/// Parse and validate the contents of a beam library file.
///
/// An empty array parses successfully; rejecting it is left to the
/// optimizer so that the error is a configuration error.
pub fn parse_catalog(content: &str) -> OptimizerResult<Vec<CatalogSection>> {
    let sections: Vec<CatalogSection> = serde_json::from_str(content)?;

    let mut seen = HashSet::new();
    for (index, section) in sections.iter().enumerate() {
        validate_section(index, section)?;
        if !seen.insert(section.section_id.as_str()) {
            tracing::warn!(
                "Duplicate section '{}' in beam library (entry {})",
                section.section_id,
                index
            );
        }
    }

    Ok(sections)
}

fn validate_section(index: usize, section: &CatalogSection) -> OptimizerResult<()> {
    let invalid = |reason: String| OptimizerError::InvalidCatalogEntry { index, reason };

    if section.section_id.trim().is_empty() {
        return Err(invalid("Section must not be empty".to_string()));
    }
    if !section.max_moment.is_finite() || section.max_moment <= 0.0 {
        return Err(invalid(format!(
            "MaxMoment of '{}' must be a positive number (got {})",
            section.section_id, section.max_moment
        )));
    }
    if !section.cost.is_finite() || section.cost < 0.0 {
        return Err(invalid(format!(
            "Cost of '{}' must be a non-negative number (got {})",
            section.section_id, section.cost
        )));
    }
    Ok(())
}
