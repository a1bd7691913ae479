//! Data model shared by the API client, the session and the renderers

pub mod api;
pub mod result;
pub mod settings;

pub use api::{ErrorResponse, JobDescriptionRequest, ResumeListItem, ResumeUploadResponse};
pub use result::{
    format_number, AnalysisResult, AnalysisSummary, AtsScore, GrammarError, Impact,
    QualityRecommendation, Readability, ReadabilityMetrics, ScoreMap, Suggestion, SuggestionType, TextQuality,
};
pub use settings::{AnalysisSettings, AtsMode, ExperienceLevel, GrammarIntensity, LanguageVariant, TargetRole};
