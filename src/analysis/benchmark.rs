//! Comparison of an analysis against industry benchmark figures

use crate::analysis::catalog::{Benchmark, IndustryCatalog};
use crate::model::{format_number, AnalysisResult};
use colored::Color;
use serde::Serialize;

const SKILL_DISTRIBUTION_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Performance {
    AboveAverage,
    Average,
    BelowAverage,
}

impl Performance {
    /// Rate `value` against `benchmark` by their ratio.
    pub fn rate(value: f64, benchmark: f64) -> Self {
        let ratio = if benchmark > 0.0 { value / benchmark } else { 0.0 };
        if ratio >= 1.1 {
            Performance::AboveAverage
        } else if ratio >= 0.9 {
            Performance::Average
        } else {
            Performance::BelowAverage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Performance::AboveAverage => "Above Average",
            Performance::Average => "Average",
            Performance::BelowAverage => "Below Average",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Performance::AboveAverage => Color::Green,
            Performance::Average => Color::Yellow,
            Performance::BelowAverage => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub title: &'static str,
    pub value: f64,
    pub benchmark: f64,
    pub suffix: &'static str,
    pub performance: Performance,
    /// Bar fill, `value / benchmark` as a percentage capped at 100.
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickImprovement {
    pub title: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryComparison {
    pub industry: Option<String>,
    pub benchmark: Benchmark,
    pub metrics: Vec<MetricComparison>,
    /// `(skill, confidence percent)` for the first skills in the map.
    pub skill_distribution: Vec<(String, u32)>,
    pub improvements: Vec<QuickImprovement>,
}

impl MetricComparison {
    fn new(title: &'static str, value: f64, benchmark: f64, suffix: &'static str) -> Self {
        let progress_percent = if benchmark > 0.0 {
            (value / benchmark * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            title,
            value,
            benchmark,
            suffix,
            performance: Performance::rate(value, benchmark),
            progress_percent,
        }
    }
}

impl IndustryComparison {
    pub fn subtitle(&self) -> String {
        match &self.industry {
            Some(industry) => format!("Compared to {} industry", industry),
            None => "General industry comparison".to_string(),
        }
    }
}

pub fn compare(
    result: &AnalysisResult,
    catalog: &IndustryCatalog,
    industry: Option<&str>,
) -> IndustryComparison {
    let benchmark = catalog.benchmark_for(industry);

    let score = result.ats_score.total_score;
    let skills = result.analysis_summary.total_skills as f64;
    let experience = result.experience_years().unwrap_or(0.0);

    let metrics = vec![
        MetricComparison::new("ATS Score", score, benchmark.avg_score, "%"),
        MetricComparison::new("Skills Identified", skills, benchmark.avg_skills, ""),
        MetricComparison::new("Years Experience", experience, benchmark.avg_experience, "y"),
    ];

    let skill_distribution = result
        .skills
        .iter()
        .flatten()
        .take(SKILL_DISTRIBUTION_LIMIT)
        .map(|(skill, confidence)| (skill.clone(), (confidence * 100.0).round() as u32))
        .collect();

    let mut improvements = Vec::new();
    if score < benchmark.avg_score {
        improvements.push(QuickImprovement {
            title: "Boost ATS Score",
            detail: format!(
                "Add more industry keywords to reach the {}% industry average",
                format_number(benchmark.avg_score)
            ),
        });
    }
    if skills < benchmark.avg_skills {
        improvements.push(QuickImprovement {
            title: "Expand Skills",
            detail: format!(
                "Consider adding {} more relevant skills",
                (benchmark.avg_skills - skills).ceil() as u32
            ),
        });
    }
    if !result.analysis_summary.has_contact_info {
        improvements.push(QuickImprovement {
            title: "Add Contact Info",
            detail: "Include phone number, email, and LinkedIn profile".to_string(),
        });
    }
    let grammar_issues = result.grammar_issue_count();
    if grammar_issues > 0 {
        improvements.push(QuickImprovement {
            title: "Fix Grammar",
            detail: format!("{} grammar issues detected", grammar_issues),
        });
    }

    IndustryComparison {
        industry: industry.filter(|i| !i.is_empty()).map(str::to_string),
        benchmark,
        metrics,
        skill_distribution,
        improvements,
    }
}
