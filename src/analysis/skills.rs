//! Grouping of extracted skills into display categories

use crate::error::{AnalyzerError, Result};
use aho_corasick::AhoCorasick;
use colored::Color;
use serde::Serialize;
use std::collections::BTreeMap;

/// Below this many skills the panel nudges the user to add more.
pub const RECOMMENDED_MIN_SKILLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Tools,
        SkillCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::Soft => "Soft Skills",
            SkillCategory::Tools => "Tools & Technologies",
            SkillCategory::Other => "Other Skills",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "💻",
            SkillCategory::Soft => "🤝",
            SkillCategory::Tools => "🛠",
            SkillCategory::Other => "🧠",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SkillCategory::Technical => Color::Blue,
            SkillCategory::Soft => Color::Green,
            SkillCategory::Tools => Color::Magenta,
            SkillCategory::Other => Color::White,
        }
    }
}

/// Substring-based skill categorizer. The first category whose vocabulary
/// occurs inside the skill name wins, checked in `SkillCategory::ALL` order.
pub struct SkillCategorizer {
    technical: AhoCorasick,
    soft: AhoCorasick,
    tools: AhoCorasick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedSkills {
    pub groups: BTreeMap<SkillCategory, Vec<String>>,
    pub total: usize,
}

impl SkillCategorizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            technical: Self::build(&Self::default_technical_terms())?,
            soft: Self::build(&Self::default_soft_terms())?,
            tools: Self::build(&Self::default_tool_terms())?,
        })
    }

    fn build(terms: &[&str]) -> Result<AhoCorasick> {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(terms)
            .map_err(|e| AnalyzerError::InvalidInput(format!("Failed to build skill matcher: {}", e)))
    }

    pub fn category_of(&self, skill: &str) -> SkillCategory {
        let skill = skill.to_lowercase();
        if self.technical.is_match(&skill) {
            SkillCategory::Technical
        } else if self.soft.is_match(&skill) {
            SkillCategory::Soft
        } else if self.tools.is_match(&skill) {
            SkillCategory::Tools
        } else {
            SkillCategory::Other
        }
    }

    /// Group skills, keeping input order (and duplicates) inside each group.
    pub fn categorize(&self, skills: &[String]) -> CategorizedSkills {
        let mut groups: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
        for skill in skills {
            groups
                .entry(self.category_of(skill))
                .or_default()
                .push(skill.clone());
        }
        CategorizedSkills {
            groups,
            total: skills.len(),
        }
    }

    fn default_technical_terms() -> Vec<&'static str> {
        vec![
            "python", "javascript", "java", "react", "node", "html", "css", "sql", "php", "c++",
            "c#",
        ]
    }

    fn default_soft_terms() -> Vec<&'static str> {
        vec![
            "leadership", "communication", "teamwork", "management", "analytical", "creative",
        ]
    }

    fn default_tool_terms() -> Vec<&'static str> {
        vec!["git", "docker", "kubernetes", "aws", "azure", "jenkins", "jira"]
    }
}

impl CategorizedSkills {
    pub fn count(&self, category: SkillCategory) -> usize {
        self.groups.get(&category).map(Vec::len).unwrap_or(0)
    }

    /// Non-empty groups in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = (SkillCategory, &[String])> {
        SkillCategory::ALL.into_iter().filter_map(|category| {
            self.groups
                .get(&category)
                .filter(|skills| !skills.is_empty())
                .map(|skills| (category, skills.as_slice()))
        })
    }

    pub fn needs_more_skills(&self) -> bool {
        self.total < RECOMMENDED_MIN_SKILLS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_categorize_by_first_matching_category() {
        let categorizer = SkillCategorizer::new().unwrap();
        assert_eq!(categorizer.category_of("Python"), SkillCategory::Technical);
        assert_eq!(categorizer.category_of("Team Leadership"), SkillCategory::Soft);
        assert_eq!(categorizer.category_of("Docker"), SkillCategory::Tools);
        assert_eq!(categorizer.category_of("Woodworking"), SkillCategory::Other);
        // "javascript" is technical even though no tool matches
        assert_eq!(categorizer.category_of("JavaScript"), SkillCategory::Technical);
        // technical wins over tools: "node" before "aws"
        assert_eq!(categorizer.category_of("node on aws"), SkillCategory::Technical);
    }

    #[test]
    fn test_groups_keep_duplicates_and_order() {
        let categorizer = SkillCategorizer::new().unwrap();
        let result = categorizer.categorize(&skills(&["SQL", "Git", "sql", "Baking"]));
        assert_eq!(result.groups[&SkillCategory::Technical], skills(&["SQL", "sql"]));
        assert_eq!(result.count(SkillCategory::Tools), 1);
        assert_eq!(result.count(SkillCategory::Soft), 0);
        assert_eq!(result.total, 4);
        assert!(result.needs_more_skills());

        let order: Vec<SkillCategory> = result.non_empty().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![SkillCategory::Technical, SkillCategory::Tools, SkillCategory::Other]
        );
    }
}
