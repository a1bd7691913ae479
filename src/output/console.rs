//! Terminal rendering of the analysis panels

use crate::analysis::benchmark::{compare, IndustryComparison};
use crate::analysis::catalog::IndustryCatalog;
use crate::analysis::keywords::{Importance, KeywordAnalysis, KeywordScorer, KeywordStatus};
use crate::analysis::quality::quality_view;
use crate::analysis::skills::{CategorizedSkills, SkillCategorizer, SkillCategory, RECOMMENDED_MIN_SKILLS};
use crate::error::Result;
use crate::analysis::suggestions::{action_items, group_suggestions, EMPTY_MESSAGE};
use crate::format::{
    component_color, format_file_size, grade_color, impact_color, readability_color,
    suggestion_color, suggestion_icon, suggestion_label, truncate_text, ScoreBand,
};
use crate::model::{
    format_number, AnalysisResult, AnalysisSettings, Readability, ResumeListItem, Suggestion, TextQuality,
};
use crate::session::{progress_steps, Notification, NotificationLevel, ProgressStep, SessionView, StepState};
use clap::ValueEnum;
use colored::{Color, Colorize};

const BAR_WIDTH: usize = 20;
const KEYWORD_ROWS: usize = 15;

/// Panels that `analyze --view` can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Progress,
    Score,
    Suggestions,
    Skills,
    Quality,
    Keywords,
    Analytics,
    Settings,
}

impl Panel {
    /// Panels shown when none are requested explicitly.
    pub fn defaults_for(settings: &AnalysisSettings) -> Vec<Panel> {
        let mut panels = vec![
            Panel::Progress,
            Panel::Score,
            Panel::Suggestions,
            Panel::Skills,
            Panel::Quality,
        ];
        if settings.include_keyword_analysis {
            panels.push(Panel::Keywords);
        }
        if settings.include_industry_comparison {
            panels.push(Panel::Analytics);
        }
        panels
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Fixed-width bar filled to `percent` of its width.
    fn bar(&self, percent: f64, color: Color) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        self.colorize(&bar, color)
    }

    /// Render one panel from the session snapshot. Panels that need an
    /// analysis render nothing while there is none.
    pub fn format_panel(
        &self,
        panel: Panel,
        view: &SessionView<'_>,
        catalog: &IndustryCatalog,
    ) -> Result<String> {
        let industry = view.settings.industry.as_deref();
        let rendered = match (panel, view.result) {
            (Panel::Progress, result) => {
                self.format_progress(&progress_steps(view.phase, result.is_some()))
            }
            (Panel::Settings, _) => self.format_settings(view.settings),
            (_, None) => String::new(),
            (Panel::Score, Some(result)) => self.format_score(result),
            (Panel::Suggestions, Some(result)) => self.format_suggestions(&result.suggestions),
            (Panel::Skills, Some(result)) => {
                self.format_skills(&SkillCategorizer::new()?.categorize(&result.extracted_skills))
            }
            (Panel::Quality, Some(result)) => self.format_quality(result.text_quality.as_ref()),
            (Panel::Keywords, Some(result)) => {
                let scorer = KeywordScorer::new(catalog, industry)?;
                self.format_keywords(&scorer.analyze(result.text_content.as_deref()))
            }
            (Panel::Analytics, Some(result)) => {
                self.format_analytics(&compare(result, catalog, industry))
            }
        };
        Ok(rendered)
    }

    pub fn format_notification(&self, notification: &Notification) -> String {
        let (icon, color) = match notification.level {
            NotificationLevel::Success => ("✅", Color::Green),
            NotificationLevel::Info => ("ℹ️", Color::Cyan),
            NotificationLevel::Error => ("❌", Color::Red),
        };
        format!("{} {}", icon, self.colorize(&notification.message, color))
    }

    pub fn format_progress(&self, steps: &[ProgressStep]) -> String {
        let rendered: Vec<String> = steps
            .iter()
            .map(|step| match step.state {
                StepState::Completed => self.colorize(&format!("✔ {}", step.label), Color::Green),
                StepState::InProgress => self.colorize(&format!("⏳ {}", step.label), Color::Blue),
                StepState::Pending => self.colorize(&format!("○ {}", step.label), Color::BrightBlack),
            })
            .collect();
        format!("{}\n", rendered.join("  ──  "))
    }

    pub fn format_score(&self, result: &AnalysisResult) -> String {
        let score = &result.ats_score;
        let band = ScoreBand::from_score(score.total_score);
        let mut output = self.format_header("🎯 ATS Compatibility Score", 1);

        output.push_str(&format!(
            "{} {}  Grade {}  {} {}\n",
            self.bar(score.total_score, band.color()),
            self.bold(&format!("{}%", format_number(score.total_score))),
            self.colorize(&score.grade, grade_color(score.total_score)),
            band.icon(),
            self.colorize(band.label(), band.color())
        ));
        output.push_str(&format!("{}\n", self.bold(band.headline())));
        output.push_str(&format!("{}\n", band.interpretation()));

        if !score.components.is_empty() {
            output.push_str(&self.format_header("Score Breakdown", 3));
            let width = score.components.keys().map(|k| k.len()).max().unwrap_or(0);
            for (name, value) in &score.components {
                let label = name.replace('_', " ");
                output.push_str(&format!(
                    "  {:<width$}  {} {}/20\n",
                    label,
                    self.bar(value / 20.0 * 100.0, component_color(*value)),
                    format_number(*value),
                    width = width
                ));
            }
        }
        output
    }

    fn format_suggestion(&self, suggestion: &Suggestion) -> String {
        format!(
            "  {} {} {}\n     {}\n",
            suggestion_icon(suggestion.kind),
            self.bold(&suggestion.category),
            self.colorize(&format!("[{} Impact]", suggestion.impact), impact_color(suggestion.impact)),
            suggestion.suggestion
        )
    }

    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        if suggestions.is_empty() {
            let mut output = self.format_header("Suggestions", 2);
            output.push_str(&format!("{}\n", self.colorize(EMPTY_MESSAGE, Color::Green)));
            return output;
        }

        let mut output =
            self.format_header(&format!("💡 Improvement Suggestions ({})", suggestions.len()), 2);
        let groups = group_suggestions(suggestions);
        for group in &groups {
            output.push_str(&format!(
                "\n{} {}\n",
                suggestion_icon(group.kind),
                self.colorize(
                    &format!("{} ({})", suggestion_label(group.kind), group.items.len()),
                    suggestion_color(group.kind)
                )
            ));
            for suggestion in &group.items {
                output.push_str(&self.format_suggestion(suggestion));
            }
        }

        output.push_str(&self.format_header("Action Items", 3));
        for item in action_items(&groups) {
            output.push_str(&format!("  • {}\n", item));
        }
        output
    }

    pub fn format_skills(&self, skills: &CategorizedSkills) -> String {
        let mut output = self.format_header(&format!("🛠 Skills ({})", skills.total), 2);
        if skills.total == 0 {
            output.push_str("No skills were extracted from this resume.\n");
        }

        for (category, names) in skills.non_empty() {
            output.push_str(&format!(
                "\n{} {} ({})\n  ",
                category.icon(),
                self.colorize(category.label(), category.color()),
                names.len()
            ));
            output.push_str(&names.join(", "));
            output.push('\n');
        }

        let counts: Vec<String> = SkillCategory::ALL
            .iter()
            .map(|c| format!("{}: {}", c.label(), skills.count(*c)))
            .collect();
        output.push_str(&format!("\n{}\n", counts.join(" | ")));

        if skills.needs_more_skills() {
            output.push_str(&format!(
                "💡 {}\n",
                self.colorize(
                    &format!(
                        "Consider listing at least {} relevant skills. ATS systems match on skill keywords.",
                        RECOMMENDED_MIN_SKILLS
                    ),
                    Color::Yellow
                )
            ));
        }
        output
    }

    pub fn format_quality(&self, quality: Option<&TextQuality>) -> String {
        let mut output = self.format_header("📝 Text Quality Analysis", 2);
        let quality = match quality {
            Some(q) => q,
            None => {
                output.push_str("Text quality data is not available for this analysis.\n");
                return output;
            }
        };

        let view = quality_view(quality);
        let status = if view.issue_count == 0 { "✔" } else { "⚠" };
        output.push_str(&format!(
            "{} Grammar Issues: {}   Quality Score: {}/100\n",
            status,
            self.colorize(&view.issue_count.to_string(), view.severity.color()),
            format_number(quality.quality_score.round())
        ));

        if let Some(readability) = quality.readability.as_ref().and_then(Readability::metrics) {
            output.push_str(&self.format_header("Readability Analysis", 3));
            output.push_str(&format!(
                "  Reading Ease: {}   Grade Level: {:.1}   Level: {}\n",
                self.colorize(
                    &format!("{:.1}", readability.flesch_reading_ease),
                    readability_color(readability.flesch_reading_ease)
                ),
                readability.flesch_kincaid_grade,
                readability.readability_level
            ));
            output.push_str(&format!(
                "  Words: {}   Sentences: {}   Avg word length: {:.1}\n",
                readability.word_count, readability.sentence_count, quality.avg_word_length
            ));
        } else if let Some(level) = quality.readability.as_ref().and_then(Readability::level) {
            output.push_str(&self.format_header("Readability Analysis", 3));
            output.push_str(&format!("  Level: {}   Words: {}\n", level, quality.word_count));
        }

        if view.issue_count > 0 {
            output.push_str(&self.format_header(&format!("Grammar Issues ({})", view.issue_count), 3));
            for error in view.listed_errors {
                output.push_str(&format!(
                    "  • {} [{}]\n",
                    self.colorize(&error.message, Color::Red),
                    error.category
                ));
                if !error.context.is_empty() {
                    output.push_str(&format!("    \"{}\"\n", truncate_text(&error.context, 80)));
                }
                if !error.replacements.is_empty() {
                    output.push_str(&format!("    Suggestions: {}\n", error.replacements.join(", ")));
                }
            }
            if let Some(line) = view.more_issues_line() {
                output.push_str(&format!("  {}\n", line));
            }
        }

        if !view.recommendations.is_empty() {
            output.push_str(&self.format_header(
                &format!("Quality Recommendations ({})", view.recommendations.len()),
                3,
            ));
            for (priority, rec) in &view.recommendations {
                output.push_str(&format!(
                    "  {} {} [{}]\n",
                    self.bold(&rec.category),
                    self.colorize(&rec.message, priority.color()),
                    rec.priority
                ));
            }
        }

        if !view.tips.is_empty() {
            output.push_str(&self.format_header("💡 Quick Tips to Improve Quality", 3));
            for tip in view.tips {
                output.push_str(&format!("  • {}\n", tip));
            }
        }
        output
    }

    pub fn format_keywords(&self, analysis: &KeywordAnalysis) -> String {
        let mut output = self.format_header("🔍 Keyword Analysis", 2);
        let report = match analysis.report() {
            Some(report) => report,
            None => {
                output.push_str("Text content not available for analysis\n");
                output.push_str(
                    "Unable to perform keyword analysis. Please ensure the resume text was extracted properly.\n",
                );
                return output;
            }
        };

        output.push_str(&match &report.industry {
            Some(industry) => format!("Optimized for {}\n", industry),
            None => "General keyword analysis\n".to_string(),
        });
        output.push_str(&format!(
            "Found: {}   Missing: {}   Coverage: {}%\n",
            self.colorize(&report.found_count().to_string(), Color::Green),
            self.colorize(&report.missing_count().to_string(), Color::Red),
            report.coverage_percent()
        ));

        output.push_str(&self.format_header("Keyword Density", 3));
        for entry in report.entries.iter().take(KEYWORD_ROWS) {
            let (mark, color) = match entry.status {
                KeywordStatus::Found => ("✔", Color::Green),
                KeywordStatus::Missing => ("✘", Color::Red),
            };
            output.push_str(&format!(
                "  {} {:<22} {:>3}x  {:>5.2}%  {}\n",
                self.colorize(mark, color),
                entry.keyword,
                entry.count,
                entry.density,
                entry.importance.label()
            ));
        }

        let suggestions = &report.suggestions;
        if !suggestions.missing_critical.is_empty() || !suggestions.missing_important.is_empty() {
            output.push_str(&self.format_header("Missing Keywords", 3));
            for (label, entries, color) in [
                ("Critical", &suggestions.missing_critical, Color::Red),
                ("Important", &suggestions.missing_important, Color::Yellow),
            ] {
                if entries.is_empty() {
                    continue;
                }
                let names: Vec<&str> = entries.iter().map(|e| e.keyword.as_str()).collect();
                output.push_str(&format!("  {}: {}\n", self.colorize(label, color), names.join(", ")));
            }
        }

        output.push_str(&self.format_header("ATS Optimization", 3));
        for tip in &suggestions.tips {
            output.push_str(&format!("  • {}\n", tip));
        }

        let critical_total = report
            .entries
            .iter()
            .filter(|e| e.importance == Importance::Critical)
            .count();
        if critical_total > 0 && suggestions.missing_critical.len() == critical_total {
            output.push_str(&format!(
                "{}\n",
                self.colorize("None of the critical keywords were found.", Color::Red)
            ));
        }
        output
    }

    pub fn format_analytics(&self, comparison: &IndustryComparison) -> String {
        let mut output = self.format_header("📈 Performance Analytics", 2);
        output.push_str(&format!("{}\n", comparison.subtitle()));

        for metric in &comparison.metrics {
            output.push_str(&format!(
                "  {:<18} {}{} vs {}{}  {} {}\n",
                metric.title,
                format_number(metric.value),
                metric.suffix,
                format_number(metric.benchmark),
                metric.suffix,
                self.bar(metric.progress_percent, metric.performance.color()),
                self.colorize(metric.performance.label(), metric.performance.color())
            ));
        }

        if !comparison.skill_distribution.is_empty() {
            output.push_str(&self.format_header("Skills Analysis", 3));
            for (skill, confidence) in &comparison.skill_distribution {
                output.push_str(&format!(
                    "  {:<20} {} {}%\n",
                    truncate_text(skill, 20),
                    self.bar(*confidence as f64, Color::Magenta),
                    confidence
                ));
            }
        }

        if !comparison.improvements.is_empty() {
            output.push_str(&self.format_header("Quick Improvements", 3));
            for improvement in &comparison.improvements {
                output.push_str(&format!(
                    "  {}: {}\n",
                    self.bold(improvement.title),
                    improvement.detail
                ));
            }
        }
        output
    }

    pub fn format_settings(&self, settings: &AnalysisSettings) -> String {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        let mut output = self.format_header("⚙ Analysis Settings", 2);
        output.push_str(&format!(
            "  Industry:            {}\n",
            settings.industry.as_deref().unwrap_or("General")
        ));
        output.push_str(&format!(
            "  Experience level:    {}\n",
            settings.experience_level.map(|l| l.label()).unwrap_or("Not specified")
        ));
        output.push_str(&format!(
            "  Target role:         {}\n",
            settings.target_role.map(|r| r.label()).unwrap_or("Not specified")
        ));
        output.push_str(&format!("  Grammar check:       {}\n", settings.grammar_intensity));
        output.push_str(&format!("  ATS mode:            {}\n", settings.ats_mode.label()));
        output.push_str(&format!("  Language:            {}\n", settings.language_variant.label()));
        output.push_str(&format!(
            "  Keyword analysis:    {}\n  Industry comparison: {}\n  Salary insights:     {}\n",
            on_off(settings.include_keyword_analysis),
            on_off(settings.include_industry_comparison),
            on_off(settings.include_salary_insights)
        ));
        output
    }

    pub fn format_resume_list(&self, resumes: &[ResumeListItem]) -> String {
        let mut output = self.format_header(&format!("📂 Your Resumes ({})", resumes.len()), 2);
        if resumes.is_empty() {
            output.push_str("No resumes uploaded yet.\n");
        }
        for item in resumes {
            let score = item
                .ats_score
                .map(|s| self.colorize(&format!("{}%", format_number(s)), grade_color(s)))
                .unwrap_or_else(|| "N/A".to_string());
            let size = item.file_size.map(format_file_size).unwrap_or_default();
            output.push_str(&format!(
                "  #{:<5} {:<40} {:>6}  {:>9}  {}  {}\n",
                item.id,
                truncate_text(&item.filename, 37),
                score,
                size,
                item.upload_timestamp.as_deref().unwrap_or("-"),
                item.processing_status.as_deref().unwrap_or("")
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::analyze_keywords;
    use crate::model::{Impact, SuggestionType};

    fn plain() -> ConsoleFormatter {
        ConsoleFormatter::new(false)
    }

    #[test]
    fn test_score_panel() {
        let mut result = AnalysisResult::placeholder();
        result.ats_score.total_score = 82.0;
        result.ats_score.grade = "A".to_string();
        result.ats_score.components.insert("keyword_match".to_string(), 16.0);
        let output = plain().format_score(&result);
        assert!(output.contains("82%"));
        assert!(output.contains("Grade A"));
        assert!(output.contains("Great"));
        assert!(output.contains("keyword match"));
        assert!(output.contains("16/20"));
    }

    #[test]
    fn test_suggestions_panel() {
        let suggestions = vec![Suggestion {
            kind: SuggestionType::Important,
            category: "Skills".to_string(),
            suggestion: "Add cloud tools".to_string(),
            impact: Impact::Medium,
        }];
        let output = plain().format_suggestions(&suggestions);
        assert!(output.contains("Important Improvements (1)"));
        assert!(output.contains("[Medium Impact]"));
        assert!(output.contains("Work on 1 important improvement(s)"));
        assert!(plain().format_suggestions(&[]).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_skills_panel_tip() {
        let skills = SkillCategorizer::new()
            .unwrap()
            .categorize(&["Python".to_string(), "Leadership".to_string()]);
        let output = plain().format_skills(&skills);
        assert!(output.contains("Technical Skills (1)"));
        assert!(output.contains("Soft Skills (1)"));
        assert!(output.contains("at least 10"));
    }

    #[test]
    fn test_keyword_panel_empty_state() {
        let output = plain().format_keywords(&analyze_keywords(None, None).unwrap());
        assert!(output.contains("Text content not available for analysis"));

        let output = plain()
            .format_keywords(&analyze_keywords(Some("strong leadership results"), None).unwrap());
        assert!(output.contains("General keyword analysis"));
        assert!(output.contains("Found: 2"));
    }

    #[test]
    fn test_default_panels_follow_settings() {
        let mut settings = AnalysisSettings::default();
        let panels = Panel::defaults_for(&settings);
        assert!(panels.contains(&Panel::Keywords));
        assert!(!panels.contains(&Panel::Analytics));

        settings.include_keyword_analysis = false;
        settings.include_industry_comparison = true;
        let panels = Panel::defaults_for(&settings);
        assert!(!panels.contains(&Panel::Keywords));
        assert!(panels.contains(&Panel::Analytics));
    }

    #[test]
    fn test_panels_without_result() {
        let settings = AnalysisSettings::default();
        let view = SessionView {
            phase: crate::session::Phase::Idle,
            result: None,
            file_name: None,
            resume_id: None,
            settings: &settings,
        };
        let catalog = IndustryCatalog::builtin();
        let formatter = plain();
        assert!(formatter.format_panel(Panel::Score, &view, catalog).unwrap().is_empty());
        assert!(formatter
            .format_panel(Panel::Progress, &view, catalog)
            .unwrap()
            .contains("○ AI Analysis"));
        assert!(formatter
            .format_panel(Panel::Settings, &view, catalog)
            .unwrap()
            .contains("Standard ATS"));
    }

    #[test]
    fn test_quality_panel_missing() {
        assert!(plain().format_quality(None).contains("not available"));
    }

    #[test]
    fn test_quality_panel_with_fallback_readability() {
        let quality: TextQuality =
            serde_json::from_str(r#"{"word_count": 240, "readability": "Basic"}"#).unwrap();
        let output = plain().format_quality(Some(&quality));
        assert!(output.contains("Readability Analysis"));
        assert!(output.contains("Level: Basic   Words: 240"));
        assert!(!output.contains("Reading Ease"));
    }

    #[test]
    fn test_resume_list_shows_size_and_status() {
        let items = vec![
            ResumeListItem {
                id: 1,
                filename: "cv.pdf".to_string(),
                ats_score: Some(72.0),
                upload_timestamp: Some("2024-05-01T10:00:00Z".to_string()),
                processing_status: Some("completed".to_string()),
                file_size: Some(2048),
            },
            ResumeListItem {
                id: 2,
                filename: "draft.docx".to_string(),
                ats_score: None,
                upload_timestamp: None,
                processing_status: Some("failed".to_string()),
                file_size: None,
            },
        ];
        let output = plain().format_resume_list(&items);
        assert!(output.contains("Your Resumes (2)"));
        assert!(output.contains("72%"));
        assert!(output.contains("2 KB"));
        assert!(output.contains("completed"));
        assert!(output.contains("N/A"));
        assert!(output.contains("failed"));

        assert!(plain().format_resume_list(&[]).contains("No resumes uploaded yet."));
    }
}
