//! Text quality view: grammar severity, listed errors and tips

use crate::model::{GrammarError, QualityRecommendation, TextQuality};
use colored::Color;

const LISTED_ERRORS: usize = 10;
const TIPS_BELOW_SCORE: f64 = 80.0;

pub const QUALITY_TIPS: [&str; 4] = [
    "Use spell check and grammar tools before uploading",
    "Keep sentences clear and concise",
    "Use active voice when possible",
    "Proofread for common errors and typos",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Clean,
    Minor,
    Major,
}

impl Severity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Severity::Clean,
            1..=5 => Severity::Minor,
            _ => Severity::Major,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::Clean => Color::Green,
            Severity::Minor => Color::Yellow,
            Severity::Major => Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Backend priorities are free text; anything unrecognised is low.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Blue,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QualityView<'a> {
    pub issue_count: usize,
    pub severity: Severity,
    pub listed_errors: &'a [GrammarError],
    /// Errors beyond the listed ones, shown as "... and N more issues".
    pub hidden_errors: usize,
    pub recommendations: Vec<(Priority, &'a QualityRecommendation)>,
    pub tips: &'static [&'static str],
}

pub fn quality_view(quality: &TextQuality) -> QualityView<'_> {
    let issue_count = quality.error_count;
    let listed = quality.grammar_errors.len().min(LISTED_ERRORS);
    let tips: &'static [&'static str] = if quality.quality_score < TIPS_BELOW_SCORE {
        &QUALITY_TIPS
    } else {
        &[]
    };

    QualityView {
        issue_count,
        severity: Severity::from_count(issue_count),
        listed_errors: &quality.grammar_errors[..listed],
        hidden_errors: quality.grammar_errors.len() - listed,
        recommendations: quality
            .recommendations
            .iter()
            .map(|rec| (Priority::parse(&rec.priority), rec))
            .collect(),
        tips,
    }
}

impl QualityView<'_> {
    pub fn more_issues_line(&self) -> Option<String> {
        (self.hidden_errors > 0).then(|| format!("... and {} more issues", self.hidden_errors))
    }
}
