//! User-editable analysis settings

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Local rendering preferences. Always fully populated; the session replaces
/// the whole value at once and nothing here is sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Industry name as listed in the catalog. `None` means general.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<TargetRole>,
    #[serde(default)]
    pub grammar_intensity: GrammarIntensity,
    #[serde(default)]
    pub ats_mode: AtsMode,
    #[serde(default = "default_true")]
    pub include_keyword_analysis: bool,
    #[serde(default)]
    pub include_industry_comparison: bool,
    #[serde(default)]
    pub include_salary_insights: bool,
    #[serde(default)]
    pub language_variant: LanguageVariant,
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            industry: None,
            experience_level: None,
            target_role: None,
            grammar_intensity: GrammarIntensity::Advanced,
            ats_mode: AtsMode::Standard,
            include_keyword_analysis: true,
            include_industry_comparison: false,
            include_salary_insights: false,
            language_variant: LanguageVariant::Us,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRole {
    IndividualContributor,
    TeamLead,
    Manager,
    SeniorManager,
    Director,
    VicePresident,
    CLevelExecutive,
    Consultant,
    Freelancer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GrammarIntensity {
    Basic,
    #[default]
    Advanced,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AtsMode {
    #[default]
    Standard,
    Workday,
    Greenhouse,
    Lever,
    #[value(name = "successfactors")]
    SuccessFactors,
    Taleo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    #[default]
    Us,
    Uk,
    Ca,
    Au,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level (0-2 years)",
            ExperienceLevel::Mid => "Mid Level (3-7 years)",
            ExperienceLevel::Senior => "Senior Level (8-15 years)",
            ExperienceLevel::Executive => "Executive (15+ years)",
        }
    }
}

impl TargetRole {
    pub fn label(&self) -> &'static str {
        match self {
            TargetRole::IndividualContributor => "Individual Contributor",
            TargetRole::TeamLead => "Team Lead",
            TargetRole::Manager => "Manager",
            TargetRole::SeniorManager => "Senior Manager",
            TargetRole::Director => "Director",
            TargetRole::VicePresident => "Vice President",
            TargetRole::CLevelExecutive => "C-Level Executive",
            TargetRole::Consultant => "Consultant",
            TargetRole::Freelancer => "Freelancer",
        }
    }
}

impl AtsMode {
    pub fn label(&self) -> &'static str {
        match self {
            AtsMode::Standard => "Standard ATS",
            AtsMode::Workday => "Workday Optimized",
            AtsMode::Greenhouse => "Greenhouse Optimized",
            AtsMode::Lever => "Lever Optimized",
            AtsMode::SuccessFactors => "SuccessFactors Optimized",
            AtsMode::Taleo => "Taleo Optimized",
        }
    }
}

impl LanguageVariant {
    pub fn label(&self) -> &'static str {
        match self {
            LanguageVariant::Us => "US English",
            LanguageVariant::Uk => "UK English",
            LanguageVariant::Ca => "Canadian English",
            LanguageVariant::Au => "Australian English",
        }
    }
}

impl fmt::Display for GrammarIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GrammarIntensity::Basic => "Basic",
            GrammarIntensity::Advanced => "Advanced",
            GrammarIntensity::Strict => "Strict",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fully_populated() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.grammar_intensity, GrammarIntensity::Advanced);
        assert_eq!(settings.ats_mode, AtsMode::Standard);
        assert_eq!(settings.language_variant, LanguageVariant::Us);
        assert!(settings.include_keyword_analysis);
        assert!(!settings.include_industry_comparison);
        assert!(!settings.include_salary_insights);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: AnalysisSettings =
            toml::from_str("industry = \"Finance & Banking\"\nats_mode = \"taleo\"").unwrap();
        assert_eq!(settings.industry.as_deref(), Some("Finance & Banking"));
        assert_eq!(settings.ats_mode, AtsMode::Taleo);
        assert!(settings.include_keyword_analysis);
        assert_eq!(settings.grammar_intensity, GrammarIntensity::Advanced);
    }
}
