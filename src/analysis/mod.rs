//! Local analysis over a backend result
//! Keyword scoring, industry comparison and the view models behind the panels

pub mod benchmark;
pub mod catalog;
pub mod keywords;
pub mod quality;
pub mod skills;
pub mod suggestions;

pub use benchmark::{compare, IndustryComparison, Performance};
pub use catalog::{Benchmark, IndustryCatalog};
pub use keywords::{analyze_keywords, KeywordAnalysis, KeywordReport, KeywordScorer};
pub use skills::{CategorizedSkills, SkillCategorizer, SkillCategory};
