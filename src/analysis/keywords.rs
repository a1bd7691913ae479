//! Keyword density scoring against an industry keyword list

use crate::analysis::catalog::IndustryCatalog;
use crate::error::{AnalyzerError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

const CRITICAL_TERMS: [&str; 5] = ["leadership", "management", "experience", "skills", "results"];
const IMPORTANT_TERMS: [&str; 5] = ["project", "team", "analysis", "strategy", "communication"];

const MAX_MISSING_CRITICAL: usize = 5;
const MAX_MISSING_IMPORTANT: usize = 8;

pub const ATS_TIPS: [&str; 5] = [
    "Add action verbs like \"led\", \"developed\", \"implemented\"",
    "Include quantifiable achievements with numbers",
    "Use industry-specific terminology",
    "Match job posting keywords exactly",
    "Include both acronyms and full terms (e.g., \"AI\" and \"Artificial Intelligence\")",
];

/// Scores resume text against one keyword list.
pub struct KeywordScorer {
    industry: Option<String>,
    patterns: Vec<(String, Regex)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScoreEntry {
    pub keyword: String,
    pub count: usize,
    /// Occurrences per hundred words.
    pub density: f64,
    pub status: KeywordStatus,
    pub importance: Importance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordStatus {
    Found,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Important,
    Standard,
}

/// Outcome of a scoring pass. Text may be absent from the analysis, in
/// which case there is nothing to score.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordAnalysis {
    Unavailable,
    Available(KeywordReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub industry: Option<String>,
    pub word_count: usize,
    /// Sorted by occurrence count, highest first.
    pub entries: Vec<KeywordScoreEntry>,
    pub suggestions: KeywordSuggestions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestions {
    pub missing_critical: Vec<KeywordScoreEntry>,
    pub missing_important: Vec<KeywordScoreEntry>,
    pub tips: Vec<String>,
}

impl KeywordScorer {
    /// Scorer for the catalog list of `industry`, falling back to the default list.
    pub fn new(catalog: &IndustryCatalog, industry: Option<&str>) -> Result<Self> {
        let keywords = catalog.keywords_for(industry);
        let mut scorer = Self::with_keywords(keywords)?;
        scorer.industry = industry.filter(|i| !i.is_empty()).map(str::to_string);
        Ok(scorer)
    }

    pub fn with_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let keyword = keyword.as_ref();
                RegexBuilder::new(&regex::escape(&keyword.to_lowercase()))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (keyword.to_string(), re))
                    .map_err(|e| {
                        AnalyzerError::InvalidInput(format!("Bad keyword '{}': {}", keyword, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            industry: None,
            patterns,
        })
    }

    /// Count each keyword in `text`. Matching is literal substring matching,
    /// so "team" also counts inside "teamwork".
    pub fn analyze(&self, text: Option<&str>) -> KeywordAnalysis {
        let text = match text {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return KeywordAnalysis::Unavailable,
        };

        // Naive split on single spaces; never zero for non-empty text.
        let word_count = text.split(' ').count();

        let mut entries: Vec<KeywordScoreEntry> = self
            .patterns
            .iter()
            .map(|(keyword, pattern)| {
                let count = pattern.find_iter(&text).count();
                KeywordScoreEntry {
                    keyword: keyword.clone(),
                    count,
                    density: count as f64 / word_count as f64 * 100.0,
                    status: if count > 0 {
                        KeywordStatus::Found
                    } else {
                        KeywordStatus::Missing
                    },
                    importance: classify_importance(keyword),
                }
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count));

        let suggestions = build_suggestions(&entries);

        KeywordAnalysis::Available(KeywordReport {
            industry: self.industry.clone(),
            word_count,
            entries,
            suggestions,
        })
    }
}

/// Importance derives from the keyword itself, not from the resume.
pub fn classify_importance(keyword: &str) -> Importance {
    let keyword = keyword.to_lowercase();
    if CRITICAL_TERMS.iter().any(|term| keyword.contains(term)) {
        Importance::Critical
    } else if IMPORTANT_TERMS.iter().any(|term| keyword.contains(term)) {
        Importance::Important
    } else {
        Importance::Standard
    }
}

fn build_suggestions(entries: &[KeywordScoreEntry]) -> KeywordSuggestions {
    let missing = |importance: Importance, limit: usize| {
        entries
            .iter()
            .filter(|e| e.status == KeywordStatus::Missing && e.importance == importance)
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
    };

    KeywordSuggestions {
        missing_critical: missing(Importance::Critical, MAX_MISSING_CRITICAL),
        missing_important: missing(Importance::Important, MAX_MISSING_IMPORTANT),
        tips: ATS_TIPS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Score `text` with the built-in catalog.
pub fn analyze_keywords(text: Option<&str>, industry: Option<&str>) -> Result<KeywordAnalysis> {
    let scorer = KeywordScorer::new(IndustryCatalog::builtin(), industry)?;
    Ok(scorer.analyze(text))
}

impl KeywordReport {
    pub fn found_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == KeywordStatus::Found)
            .count()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.len() - self.found_count()
    }

    /// Share of keywords found, as a rounded percentage.
    pub fn coverage_percent(&self) -> u32 {
        if self.entries.is_empty() {
            return 0;
        }
        (self.found_count() as f64 / self.entries.len() as f64 * 100.0).round() as u32
    }

    pub fn entry(&self, keyword: &str) -> Option<&KeywordScoreEntry> {
        self.entries.iter().find(|e| e.keyword == keyword)
    }
}

impl KeywordAnalysis {
    pub fn report(&self) -> Option<&KeywordReport> {
        match self {
            KeywordAnalysis::Available(report) => Some(report),
            KeywordAnalysis::Unavailable => None,
        }
    }
}

impl Importance {
    pub fn label(&self) -> &'static str {
        match self {
            Importance::Critical => "critical",
            Importance::Important => "important",
            Importance::Standard => "standard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str, industry: Option<&str>) -> KeywordReport {
        match analyze_keywords(Some(text), industry).unwrap() {
            KeywordAnalysis::Available(report) => report,
            KeywordAnalysis::Unavailable => panic!("expected a report"),
        }
    }

    #[test]
    fn test_default_list_counts_found_and_missing() {
        let report = report("I have strong leadership and team skills", None);
        assert_eq!(report.entries.len(), 12);
        assert_eq!(report.word_count, 7);

        let leadership = report.entry("leadership").unwrap();
        assert_eq!(leadership.count, 1);
        assert_eq!(leadership.status, KeywordStatus::Found);
        assert!((leadership.density - 100.0 / 7.0).abs() < 1e-9);

        for entry in report.entries.iter().filter(|e| e.count == 0) {
            assert_eq!(entry.status, KeywordStatus::Missing);
        }
        assert_eq!(report.entry("teamwork").unwrap().status, KeywordStatus::Missing);
    }

    #[test]
    fn test_custom_list_matches_team() {
        let scorer = KeywordScorer::with_keywords(&["leadership", "team", "kotlin"]).unwrap();
        let report = scorer
            .analyze(Some("I have strong leadership and team skills"))
            .report()
            .cloned()
            .unwrap();
        assert!(report.entry("team").unwrap().count >= 1);
        assert_eq!(report.entry("team").unwrap().status, KeywordStatus::Found);
        assert_eq!(report.entry("kotlin").unwrap().status, KeywordStatus::Missing);
    }

    #[test]
    fn test_substring_and_case_insensitive_counting() {
        let scorer = KeywordScorer::with_keywords(&["team", "CI/CD"]).unwrap();
        let report = scorer
            .analyze(Some("Teamwork across TEAMS; built ci/cd pipelines"))
            .report()
            .cloned()
            .unwrap();
        assert_eq!(report.entry("team").unwrap().count, 2);
        assert_eq!(report.entry("CI/CD").unwrap().count, 1);
    }

    #[test]
    fn test_missing_text_is_unavailable() {
        assert_eq!(analyze_keywords(None, None).unwrap(), KeywordAnalysis::Unavailable);
        assert_eq!(
            analyze_keywords(Some(""), Some("Finance & Banking")).unwrap(),
            KeywordAnalysis::Unavailable
        );
    }

    #[test]
    fn test_entries_sorted_by_count() {
        let report = report("results results results planning strategy strategy", None);
        let counts: Vec<usize> = report.entries.iter().map(|e| e.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
        assert_eq!(report.entries[0].keyword, "results");
    }

    #[test]
    fn test_importance_is_keyword_based() {
        assert_eq!(classify_importance("project management"), Importance::Critical);
        assert_eq!(classify_importance("teamwork"), Importance::Important);
        assert_eq!(classify_importance("agile"), Importance::Standard);
        assert_eq!(classify_importance("Leadership"), Importance::Critical);
    }

    #[test]
    fn test_missing_suggestions_buckets() {
        let report = report("nothing relevant here", None);
        assert!(report.suggestions.missing_critical.len() <= 5);
        assert!(report.suggestions.missing_important.len() <= 8);
        assert!(report
            .suggestions
            .missing_critical
            .iter()
            .all(|e| e.importance == Importance::Critical));
        // leadership, management, project management, results
        assert_eq!(report.suggestions.missing_critical.len(), 4);
        assert_eq!(report.suggestions.tips.len(), 5);
        assert_eq!(report.coverage_percent(), 0);
    }

    #[test]
    fn test_industry_selection() {
        let report = report("Deployed docker and kubernetes on AWS", Some("Technology & Software"));
        assert_eq!(report.industry.as_deref(), Some("Technology & Software"));
        assert_eq!(report.entries.len(), 18);
        assert_eq!(report.entry("docker").unwrap().status, KeywordStatus::Found);
        assert_eq!(report.found_count(), 3);
        assert_eq!(report.missing_count(), 15);
    }
}
