//! Display mappings from scores and categories to colours, labels and icons

use crate::model::{Impact, SuggestionType};
use colored::Color;

const ORANGE: Color = Color::TrueColor { r: 234, g: 88, b: 12 };

/// Qualitative band of an overall ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    NeedsWork,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ScoreBand::Excellent
        } else if score >= 80.0 {
            ScoreBand::Great
        } else if score >= 70.0 {
            ScoreBand::Good
        } else if score >= 60.0 {
            ScoreBand::NeedsWork
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Great => "Great",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsWork => "Needs Work",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🚀",
            ScoreBand::Great => "✨",
            ScoreBand::Good => "👍",
            ScoreBand::NeedsWork => "⚠️",
            ScoreBand::NeedsImprovement => "🔧",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Great => Color::Blue,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::NeedsWork => ORANGE,
            ScoreBand::NeedsImprovement => Color::Red,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Outstanding! Your resume is perfectly optimized",
            ScoreBand::Great => "Excellent! Minor tweaks can perfect your score",
            ScoreBand::Good => "Good foundation with optimization opportunities",
            ScoreBand::NeedsWork => "Needs improvement to pass ATS filters",
            ScoreBand::NeedsImprovement => "Significant optimization needed for ATS success",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            ScoreBand::Excellent | ScoreBand::Great => {
                "Your resume should perform exceptionally well with most ATS systems and get past initial screening."
            }
            _ => {
                "Follow the suggestions below to improve your ATS compatibility and job search success."
            }
        }
    }
}

/// Colour of the grade badge.
pub fn grade_color(score: f64) -> Color {
    if score >= 80.0 {
        Color::Green
    } else if score >= 60.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Colour of a component bar; components are scored out of 20.
pub fn component_color(value: f64) -> Color {
    if value >= 16.0 {
        Color::Blue
    } else if value >= 12.0 {
        Color::Magenta
    } else {
        Color::Red
    }
}

pub fn suggestion_icon(kind: SuggestionType) -> &'static str {
    match kind {
        SuggestionType::Critical => "🚨",
        SuggestionType::Important => "⚠️",
        SuggestionType::Moderate => "ℹ️",
    }
}

pub fn suggestion_label(kind: SuggestionType) -> &'static str {
    match kind {
        SuggestionType::Critical => "Critical Issues",
        SuggestionType::Important => "Important Improvements",
        SuggestionType::Moderate => "Minor Suggestions",
    }
}

pub fn suggestion_color(kind: SuggestionType) -> Color {
    match kind {
        SuggestionType::Critical => Color::Red,
        SuggestionType::Important => Color::Yellow,
        SuggestionType::Moderate => Color::Blue,
    }
}

pub fn impact_color(impact: Impact) -> Color {
    match impact {
        Impact::High => Color::Red,
        Impact::Medium => Color::Yellow,
        Impact::Low => Color::Blue,
    }
}

pub fn readability_color(score: f64) -> Color {
    if score >= 80.0 {
        Color::Green
    } else if score >= 60.0 {
        Color::Yellow
    } else if score >= 40.0 {
        ORANGE
    } else {
        Color::Red
    }
}

/// Human readable size, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut exponent = 0;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Cut `text` to `max_length` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    format!("{}...", truncated)
}
