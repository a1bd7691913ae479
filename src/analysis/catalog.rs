//! Versioned industry keyword lists and benchmarks

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Catalog format understood by this build.
pub const CATALOG_VERSION: u32 = 1;

/// Key used when no industry, or an unknown one, is selected.
pub const DEFAULT_KEY: &str = "default";

const BUILTIN_CATALOG: &str = include_str!("../../data/industry_catalog.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryCatalog {
    pub version: u32,
    /// Industries offered in the settings, in display order.
    pub industries: Vec<String>,
    keywords: BTreeMap<String, Vec<String>>,
    benchmarks: BTreeMap<String, Benchmark>,
}

/// Reference figures for one industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub avg_score: f64,
    pub avg_skills: f64,
    pub avg_experience: f64,
}

impl IndustryCatalog {
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: IndustryCatalog = toml::from_str(content)
            .map_err(|e| AnalyzerError::Catalog(format!("Failed to parse catalog: {}", e)))?;

        if catalog.version != CATALOG_VERSION {
            return Err(AnalyzerError::Catalog(format!(
                "Unsupported catalog version {} (expected {})",
                catalog.version, CATALOG_VERSION
            )));
        }
        if !catalog.keywords.contains_key(DEFAULT_KEY) {
            return Err(AnalyzerError::Catalog("Catalog has no default keyword list".to_string()));
        }
        if !catalog.benchmarks.contains_key(DEFAULT_KEY) {
            return Err(AnalyzerError::Catalog("Catalog has no default benchmark".to_string()));
        }

        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static IndustryCatalog {
        static CATALOG: OnceLock<IndustryCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            IndustryCatalog::parse(BUILTIN_CATALOG).expect("Invalid built-in industry catalog")
        })
    }

    /// Keyword list for `industry`, or the default list.
    pub fn keywords_for(&self, industry: Option<&str>) -> &[String] {
        industry
            .filter(|name| !name.is_empty())
            .and_then(|name| self.keywords.get(name))
            .or_else(|| self.keywords.get(DEFAULT_KEY))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn benchmark_for(&self, industry: Option<&str>) -> Benchmark {
        industry
            .filter(|name| !name.is_empty())
            .and_then(|name| self.benchmarks.get(name))
            .or_else(|| self.benchmarks.get(DEFAULT_KEY))
            .copied()
            .unwrap_or(Benchmark {
                avg_score: 75.0,
                avg_skills: 10.0,
                avg_experience: 5.5,
            })
    }

    pub fn is_known_industry(&self, name: &str) -> bool {
        self.industries.iter().any(|i| i == name)
    }
}
