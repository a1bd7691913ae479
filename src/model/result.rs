//! Analysis result returned by the backend for one uploaded resume

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Full structured output for one resume. Held unchanged for the session;
/// only the panels and exporters read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: AtsScore,

    #[serde(default)]
    pub suggestions: Vec<Suggestion>,

    /// Skill names as extracted. Uniqueness is not guaranteed.
    #[serde(default)]
    pub extracted_skills: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,

    pub analysis_summary: AnalysisSummary,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_quality: Option<TextQuality>,

    /// Raw extracted text, the only input of keyword scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Skill -> confidence in `0..=1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<ScoreMap>,

    /// Fields the backend sent that this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub total_score: f64,

    /// Category -> points out of 20.
    #[serde(default)]
    pub components: ScoreMap,

    pub grade: String,
}

/// Name -> score pairs kept in the order the backend sent them, so
/// breakdowns and "first N skills" follow the backend ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap(Vec<(String, f64)>);

impl ScoreMap {
    /// Insert or replace; a replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = score,
            None => self.0.push((name, score)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(existing, _)| existing == name).map(|(_, score)| *score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, f64)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = ScoreMap::default();
        for (name, score) in iter {
            map.insert(name, score);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ScoreMap {
    type Item = &'a (String, f64);
    type IntoIter = std::slice::Iter<'a, (String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, score)| (name, score)))
    }
}

impl<'de> Deserialize<'de> for ScoreMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreMapVisitor;

        impl<'de> Visitor<'de> for ScoreMapVisitor {
            type Value = ScoreMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of names to numeric scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ScoreMap, A::Error> {
                let mut map = ScoreMap::default();
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    map.insert(name, score);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ScoreMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub category: String,
    pub suggestion: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Critical,
    Important,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub total_skills: u32,
    #[serde(default)]
    pub has_contact_info: bool,
    #[serde(default)]
    pub has_experience: bool,
    #[serde(default)]
    pub has_education: bool,

    // Extension fields some backend versions send. Not guaranteed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_count: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextQuality {
    #[serde(default)]
    pub grammar_errors: Vec<GrammarError>,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability: Option<Readability>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub avg_word_length: f64,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub recommendations: Vec<QualityRecommendation>,
}

impl TextQuality {
    /// Number of grammar issues, whichever of the two backend fields is larger.
    pub fn issue_count(&self) -> usize {
        self.error_count.max(self.grammar_errors.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarError {
    pub message: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<String>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rule_id: String,
}

/// The backend sends full metrics normally, and a bare level such as
/// `"Basic"` when its text analysis fell back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Readability {
    Metrics(ReadabilityMetrics),
    Label(String),
    /// Any other shape, kept as sent so exports stay faithful.
    Unrecognized(Value),
}

impl Readability {
    pub fn metrics(&self) -> Option<&ReadabilityMetrics> {
        match self {
            Readability::Metrics(metrics) => Some(metrics),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<&str> {
        let level = match self {
            Readability::Metrics(metrics) => metrics.readability_level.as_str(),
            Readability::Label(label) => label.as_str(),
            Readability::Unrecognized(_) => return None,
        };
        Some(level).filter(|level| !level.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    #[serde(default)]
    pub readability_level: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub sentence_count: u64,
    #[serde(default)]
    pub syllable_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRecommendation {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    pub message: String,
    #[serde(default)]
    pub priority: String,
}

impl AnalysisResult {
    /// Stand-in used when an upload response carries no analysis.
    pub fn placeholder() -> Self {
        Self {
            ats_score: AtsScore {
                total_score: 0.0,
                components: ScoreMap::default(),
                grade: "F".to_string(),
            },
            suggestions: Vec::new(),
            extracted_skills: Vec::new(),
            experience_years: None,
            analysis_summary: AnalysisSummary {
                total_skills: 0,
                has_contact_info: true,
                has_experience: true,
                has_education: true,
                word_count: Some(0),
                section_count: Some(5),
                ..AnalysisSummary::default()
            },
            text_quality: None,
            text_content: None,
            skills: None,
            extra: Map::new(),
        }
    }

    /// Years of experience from the top level, falling back to the summary.
    pub fn experience_years(&self) -> Option<f64> {
        self.experience_years
            .or(self.analysis_summary.experience_years)
    }

    pub fn grammar_issue_count(&self) -> usize {
        self.text_quality
            .as_ref()
            .map(TextQuality::issue_count)
            .unwrap_or(0)
    }

    /// Top `n` suggestion texts in backend order.
    pub fn top_suggestions(&self, n: usize) -> impl Iterator<Item = &str> {
        self.suggestions.iter().take(n).map(|s| s.suggestion.as_str())
    }
}

impl SuggestionType {
    pub const ALL: [SuggestionType; 3] = [
        SuggestionType::Critical,
        SuggestionType::Important,
        SuggestionType::Moderate,
    ];
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SuggestionType::Critical => "critical",
            SuggestionType::Important => "important",
            SuggestionType::Moderate => "moderate",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Format a score the way the backend wrote it: integers without a
/// fractional part, everything else as-is.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ats_score": {"total_score": 82, "components": {"structure": 16, "keywords": 12.5}, "grade": "A"},
        "suggestions": [
            {"type": "critical", "category": "Contact", "suggestion": "Add a phone number", "impact": "High"}
        ],
        "extracted_skills": ["Python", "python"],
        "analysis_summary": {"total_skills": 2, "has_contact_info": false, "has_experience": true, "has_education": true, "section_count": 4},
        "processing_time": 1.25
    }"#;

    #[test]
    fn test_deserialize_backend_payload() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.ats_score.total_score, 82.0);
        assert_eq!(result.ats_score.components.get("keywords"), Some(12.5));
        assert_eq!(result.suggestions[0].kind, SuggestionType::Critical);
        assert_eq!(result.suggestions[0].impact, Impact::High);
        assert_eq!(result.extracted_skills.len(), 2);
        assert_eq!(result.analysis_summary.section_count, Some(4));
        assert!(result.text_content.is_none());
        assert!(result.extra.contains_key("processing_time"));
    }

    #[test]
    fn test_fallback_readability_label_is_accepted() {
        let payload = SAMPLE.replace(
            "\"processing_time\": 1.25",
            "\"text_quality\": {\"word_count\": 10, \"readability\": \"Basic\"}",
        );
        let result: AnalysisResult = serde_json::from_str(&payload).unwrap();
        let quality = result.text_quality.unwrap();
        assert_eq!(quality.word_count, 10);
        let readability = quality.readability.unwrap();
        assert!(readability.metrics().is_none());
        assert_eq!(readability.level(), Some("Basic"));
        assert_eq!(serde_json::to_value(&readability).unwrap(), "Basic");
    }

    #[test]
    fn test_readability_metrics_keep_their_level() {
        let body = r#"{"flesch_reading_ease": 54.3, "flesch_kincaid_grade": 10.2, "readability_level": "Fairly Difficult"}"#;
        let readability: Readability = serde_json::from_str(body).unwrap();
        assert_eq!(readability.metrics().unwrap().flesch_reading_ease, 54.3);
        assert_eq!(readability.level(), Some("Fairly Difficult"));

        let odd: Readability = serde_json::from_str("42").unwrap();
        assert!(odd.metrics().is_none());
        assert!(odd.level().is_none());
    }

    #[test]
    fn test_score_maps_keep_backend_order() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<&str> = result.ats_score.components.keys().collect();
        assert_eq!(names, vec!["structure", "keywords"]);

        let skills: ScoreMap = serde_json::from_str(r#"{"Rust": 0.9, "Docker": 0.7, "Python": 0.8}"#).unwrap();
        let names: Vec<&str> = skills.keys().collect();
        assert_eq!(names, vec!["Rust", "Docker", "Python"]);
        assert_eq!(
            serde_json::to_string(&skills).unwrap(),
            r#"{"Rust":0.9,"Docker":0.7,"Python":0.8}"#
        );
    }

    #[test]
    fn test_score_map_insert_replaces_in_place() {
        let mut map = ScoreMap::default();
        map.insert("b", 1.0);
        map.insert("a", 2.0);
        map.insert("b", 3.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(3.0));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_unknown_suggestion_type_is_rejected() {
        let payload = SAMPLE.replace("\"critical\"", "\"urgent\"");
        assert!(serde_json::from_str::<AnalysisResult>(&payload).is_err());
    }

    #[test]
    fn test_placeholder_shape() {
        let result = AnalysisResult::placeholder();
        assert_eq!(result.ats_score.grade, "F");
        assert_eq!(result.analysis_summary.section_count, Some(5));
        assert!(result.analysis_summary.has_contact_info);
    }

    #[test]
    fn test_experience_years_falls_back_to_summary() {
        let mut result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.experience_years(), None);
        result.analysis_summary.experience_years = Some(3.0);
        assert_eq!(result.experience_years(), Some(3.0));
        result.experience_years = Some(6.5);
        assert_eq!(result.experience_years(), Some(6.5));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(82.0), "82");
        assert_eq!(format_number(82.5), "82.5");
    }
}
