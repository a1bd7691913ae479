//! Export artifacts synthesized from one analysis result

use crate::error::{AnalyzerError, Result};
use crate::model::{format_number, AnalysisResult};
use crate::output::share::encode_uri_component;
use askama::Template;
use clap::ValueEnum;
use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

const HTML_SUGGESTIONS: usize = 8;
const DIGEST_SUGGESTIONS: usize = 3;

const NOT_AVAILABLE: &str = "N/A";
const NOT_SPECIFIED: &str = "Not specified";
const SUMMARY_FALLBACK: &str = "Continue optimizing for ATS compatibility";
const EMAIL_FALLBACK: &str = "• Focus on ATS optimization\n• Add more relevant keywords\n• Improve formatting";

/// File artifacts that can be written to the export directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportKind {
    /// Styled HTML report, printable to PDF
    Html,
    /// Plain-text executive summary
    Summary,
    /// Raw analysis data
    Json,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Html, ExportKind::Summary, ExportKind::Json];

    pub fn file_name(&self, resume_name: &str) -> String {
        let suffix = match self {
            ExportKind::Html => "analysis.html",
            ExportKind::Summary => "summary.txt",
            ExportKind::Json => "data.json",
        };
        format!("REPORT_{}_{}", resume_name, suffix)
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportKind::Html => "HTML",
            ExportKind::Summary => "SUMMARY",
            ExportKind::Json => "JSON",
        };
        f.write_str(s)
    }
}

/// Renders one artifact from an analysis result.
pub trait ReportFormatter {
    fn format_report(&self, result: &AnalysisResult, file_name: &str) -> Result<String>;
    fn kind(&self) -> ExportKind;
}

pub struct HtmlFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>AI Resume Analysis Report - {{ file_name }}</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Inter', Arial, sans-serif; line-height: 1.6; color: #1f2937; background: white; font-size: 12pt; }
        .container { max-width: 210mm; margin: 0 auto; padding: 20mm; }
        .header { text-align: center; border-bottom: 3px solid #3b82f6; padding-bottom: 20px; margin-bottom: 30px; }
        .header h1 { font-size: 28pt; font-weight: 700; color: #1e40af; margin-bottom: 10px; }
        .header p { font-size: 14pt; color: #6b7280; }
        .score { background: linear-gradient(135deg, #3b82f6, #1e40af); color: white; padding: 25px; border-radius: 12px; text-align: center; margin: 25px 0; }
        .score h2 { font-size: 24pt; font-weight: 700; margin-bottom: 8px; }
        .section { margin: 30px 0; page-break-inside: avoid; }
        .section-title { font-size: 18pt; font-weight: 600; color: #1e40af; margin-bottom: 15px; border-left: 4px solid #3b82f6; padding-left: 12px; }
        .summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .summary-item { background: #f8fafc; padding: 20px; border-radius: 10px; border: 1px solid #e5e7eb; }
        .summary-item h3 { font-size: 14pt; color: #374151; margin-bottom: 10px; }
        .summary-item p { color: #6b7280; margin-bottom: 8px; }
        .skill-item { background: #e0f2fe; color: #0369a1; padding: 8px 12px; margin: 5px; border-radius: 20px; display: inline-block; font-size: 11pt; border: 1px solid #bae6fd; }
        .recommendation { background: #fef3c7; border-left: 4px solid #f59e0b; padding: 15px; margin: 12px 0; border-radius: 0 8px 8px 0; }
        .recommendation strong { color: #92400e; }
        .components-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; }
        .component-item { border: 2px solid #e5e7eb; border-radius: 8px; padding: 15px; text-align: center; }
        .component-score { font-size: 18pt; font-weight: 700; color: #1e40af; }
        .component-label { font-size: 11pt; color: #6b7280; text-transform: capitalize; }
        .empty { color: #6b7280; font-style: italic; }
        .footer { text-align: center; margin-top: 40px; padding: 20px; background: #f3f4f6; border-radius: 10px; color: #6b7280; font-size: 11pt; }
        @media print { .container { padding: 15mm; } .summary-grid { grid-template-columns: 1fr 1fr; } }
        @page { size: A4; margin: 2cm; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🎯 AI Resume Analysis Report</h1>
            <p><strong>File:</strong> {{ file_name }} | <strong>Generated:</strong> {{ generated_at }}</p>
        </div>

        <div class="score">
            <h2>🏆 Overall ATS Score: {{ total_score }}%</h2>
            <p>Performance Grade: {{ grade }}</p>
        </div>

        <div class="section">
            <div class="section-title">📊 Executive Summary</div>
            <div class="summary-grid">
                <div class="summary-item">
                    <h3>📋 Key Metrics</h3>
                    <p><strong>Skills Identified:</strong> {{ total_skills }}</p>
                    <p><strong>Contact Information:</strong> {{ contact_info }}</p>
                    <p><strong>Professional Summary:</strong> {{ professional_summary }}</p>
                    <p><strong>Work Experience:</strong> {{ experience }}</p>
                    <p><strong>Education Section:</strong> {{ education }}</p>
                </div>
                <div class="summary-item">
                    <h3>🔍 Quality Metrics</h3>
                    <p><strong>Grammar Issues:</strong> {{ grammar_issues }}</p>
                    <p><strong>Readability Score:</strong> {{ readability }}</p>
                    <p><strong>Word Count:</strong> {{ word_count }}</p>
                    <p><strong>Text Quality:</strong> {{ text_quality }}</p>
                </div>
            </div>
        </div>

        <div class="section">
            <div class="section-title">🛠 Skills Analysis</div>
            <div>
                {% for skill in skills %}<span class="skill-item">{{ skill }}</span> {% endfor %}
                {% if skills.is_empty() %}<p class="empty">No skills identified. Consider adding relevant technical and soft skills to your resume.</p>{% endif %}
            </div>
        </div>

        <div class="section">
            <div class="section-title">💡 Top Recommendations</div>
            {% for suggestion in suggestions %}<div class="recommendation"><strong>{{ loop.index }}.</strong> {{ suggestion }}</div>{% endfor %}
            {% if suggestions.is_empty() %}<p class="empty">No specific recommendations available. Your resume appears to be well-structured.</p>{% endif %}
        </div>

        <div class="section">
            <div class="section-title">📈 ATS Score Breakdown</div>
            <div class="components-grid">
                {% for component in components %}<div class="component-item">
                    <div class="component-score">{{ component.score }}/20</div>
                    <div class="component-label">{{ component.label }}</div>
                </div>{% endfor %}
            </div>
        </div>

        <div class="footer">
            <p><strong>🤖 AI Resume Analyzer</strong></p>
            <p><em>Professional Resume Analysis &amp; Optimization Tool</em></p>
            <p>Generated on {{ generated_at }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlReportTemplate {
    file_name: String,
    generated_at: String,
    total_score: String,
    grade: String,
    total_skills: u32,
    contact_info: &'static str,
    professional_summary: &'static str,
    experience: String,
    education: &'static str,
    grammar_issues: usize,
    readability: String,
    word_count: String,
    text_quality: String,
    skills: Vec<String>,
    suggestions: Vec<String>,
    components: Vec<HtmlComponent>,
}

struct HtmlComponent {
    label: String,
    score: String,
}

fn present(flag: bool) -> &'static str {
    if flag {
        "✅ Present"
    } else {
        "❌ Missing"
    }
}

fn experience_text(result: &AnalysisResult) -> String {
    result
        .experience_years()
        .map(format_number)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Experience as used in the digests: "<n> years" or the placeholder alone.
fn experience_years_text(result: &AnalysisResult) -> String {
    match result.experience_years() {
        Some(years) => format!("{} years", format_number(years)),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Skill chips: the confidence map when the backend sent one, otherwise
/// the plain extracted names.
fn skill_chips(result: &AnalysisResult) -> Vec<String> {
    match &result.skills {
        Some(skills) if !skills.is_empty() => skills
            .iter()
            .map(|(skill, confidence)| format!("{}: {}%", skill, (confidence * 100.0).round()))
            .collect(),
        _ => result.extracted_skills.clone(),
    }
}

fn numbered_suggestions(result: &AnalysisResult, limit: usize) -> Option<String> {
    let lines: Vec<String> = result
        .top_suggestions(limit)
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

impl HtmlFormatter {
    fn create_template_data(result: &AnalysisResult, file_name: &str) -> HtmlReportTemplate {
        let summary = &result.analysis_summary;
        let quality = result.text_quality.as_ref();
        let grade = if result.ats_score.grade.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            result.ats_score.grade.clone()
        };

        HtmlReportTemplate {
            file_name: file_name.to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_score: format_number(result.ats_score.total_score),
            grade,
            total_skills: summary.total_skills,
            contact_info: if summary.has_contact_info {
                "✅ Complete"
            } else {
                "❌ Missing"
            },
            professional_summary: present(summary.has_summary.unwrap_or(false)),
            experience: experience_text(result),
            education: present(summary.has_education),
            grammar_issues: result.grammar_issue_count(),
            readability: quality
                .and_then(|q| q.readability.as_ref())
                .and_then(|r| {
                    r.metrics()
                        .map(|m| format!("{:.1}", m.flesch_reading_ease))
                        .or_else(|| r.level().map(str::to_string))
                })
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            word_count: quality
                .map(|q| q.word_count)
                .or(summary.word_count)
                .filter(|count| *count > 0)
                .map(|count| count.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            text_quality: quality
                .map(|q| format!("{}/100", q.quality_score.round()))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            skills: skill_chips(result),
            suggestions: result
                .top_suggestions(HTML_SUGGESTIONS)
                .map(str::to_string)
                .collect(),
            components: result
                .ats_score
                .components
                .iter()
                .map(|(name, score)| HtmlComponent {
                    label: name.replacen('_', " ", 1),
                    score: format_number(*score),
                })
                .collect(),
        }
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format_report(&self, result: &AnalysisResult, file_name: &str) -> Result<String> {
        Self::create_template_data(result, file_name)
            .render()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }

    fn kind(&self) -> ExportKind {
        ExportKind::Html
    }
}

impl ReportFormatter for SummaryFormatter {
    fn format_report(&self, result: &AnalysisResult, file_name: &str) -> Result<String> {
        Ok(to_text_summary(result, file_name))
    }

    fn kind(&self) -> ExportKind {
        ExportKind::Summary
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, result: &AnalysisResult, _file_name: &str) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn kind(&self) -> ExportKind {
        ExportKind::Json
    }
}

/// Self-contained printable HTML report.
pub fn to_html_report(result: &AnalysisResult, file_name: &str) -> Result<String> {
    HtmlFormatter.format_report(result, file_name)
}

/// Plain-text executive summary. Never fails; absent data becomes a placeholder.
pub fn to_text_summary(result: &AnalysisResult, file_name: &str) -> String {
    let contact = if result.analysis_summary.has_contact_info {
        "Complete"
    } else {
        "Needs attention"
    };

    format!(
        "RESUME ANALYSIS SUMMARY\n\
         ======================\n\
         \n\
         File: {file}\n\
         Overall ATS Score: {score}%\n\
         \n\
         KEY FINDINGS:\n\
         • {skills} skills identified\n\
         • Contact info: {contact}\n\
         • Experience: {experience}\n\
         • Grammar issues: {grammar}\n\
         \n\
         TOP RECOMMENDATIONS:\n\
         {recommendations}\n\
         \n\
         ---\n\
         Generated by AI Resume Analyzer\n",
        file = file_name,
        score = format_number(result.ats_score.total_score),
        skills = result.analysis_summary.total_skills,
        contact = contact,
        experience = experience_years_text(result),
        grammar = result.grammar_issue_count(),
        recommendations = numbered_suggestions(result, DIGEST_SUGGESTIONS)
            .unwrap_or_else(|| SUMMARY_FALLBACK.to_string()),
    )
}

/// Body of the results email, unencoded.
pub fn to_email_body(result: &AnalysisResult, file_name: &str) -> String {
    let score = result.ats_score.total_score;
    let verdict = if score >= 80.0 {
        "excellent"
    } else if score >= 60.0 {
        "good"
    } else {
        "significant room for improvement"
    };

    format!(
        "Hi there,\n\
         \n\
         I've completed the AI-powered analysis of the resume \"{file}\". Here are the key findings:\n\
         \n\
         📊 OVERALL SCORE: {score}%\n\
         \n\
         🔍 KEY METRICS:\n\
         • Skills Identified: {skills}\n\
         • ATS Compatibility: {score}%\n\
         • Experience Level: {experience}\n\
         • Quality Check: {grammar} grammar issues\n\
         \n\
         🎯 TOP RECOMMENDATIONS:\n\
         {recommendations}\n\
         \n\
         The analysis shows {verdict} ATS compatibility with opportunities for enhancement.\n\
         \n\
         Best regards,\n\
         AI Resume Analyzer\n",
        file = file_name,
        score = format_number(score),
        skills = result.analysis_summary.total_skills,
        experience = experience_years_text(result),
        grammar = result.grammar_issue_count(),
        recommendations = numbered_suggestions(result, DIGEST_SUGGESTIONS)
            .unwrap_or_else(|| EMAIL_FALLBACK.to_string()),
        verdict = verdict,
    )
}

/// Pretty JSON that parses back to an equal result.
pub fn to_json_export(result: &AnalysisResult) -> Result<String> {
    JsonFormatter::new(true).format_report(result, "")
}

/// `mailto:` URI with the subject and body percent-encoded.
pub fn mailto_uri(file_name: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        encode_uri_component(&format!("Resume Analysis Results - {}", file_name)),
        encode_uri_component(body)
    )
}

/// Outcome of one requested export. Failures are kept per export so one
/// bad artifact does not hide the others.
#[derive(Debug)]
pub struct ExportOutcome {
    pub kind: ExportKind,
    pub result: Result<PathBuf>,
}

/// Dispatches export kinds to their formatters and writes the artifacts.
pub struct ReportGenerator {
    html_formatter: HtmlFormatter,
    summary_formatter: SummaryFormatter,
    json_formatter: JsonFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            html_formatter: HtmlFormatter,
            summary_formatter: SummaryFormatter,
            json_formatter: JsonFormatter::new(true),
        }
    }

    fn formatter(&self, kind: ExportKind) -> &dyn ReportFormatter {
        match kind {
            ExportKind::Html => &self.html_formatter,
            ExportKind::Summary => &self.summary_formatter,
            ExportKind::Json => &self.json_formatter,
        }
    }

    pub fn generate_report(
        &self,
        result: &AnalysisResult,
        file_name: &str,
        kind: ExportKind,
    ) -> Result<String> {
        self.formatter(kind).format_report(result, file_name)
    }

    /// Render and write every requested export into `dir`.
    pub fn export_all(
        &self,
        result: &AnalysisResult,
        file_name: &str,
        kinds: &[ExportKind],
        dir: &Path,
    ) -> Vec<ExportOutcome> {
        kinds
            .iter()
            .map(|&kind| {
                let outcome = self.generate_report(result, file_name, kind).and_then(|content| {
                    let path = dir.join(safe_file_name(&kind.file_name(file_name)));
                    save_report_to_file(&content, &path)?;
                    Ok(path)
                });
                match &outcome {
                    Ok(path) => info!("{} export written to {}", kind, path.display()),
                    Err(e) => warn!("{} export failed: {}", kind, e),
                }
                ExportOutcome {
                    kind,
                    result: outcome,
                }
            })
            .collect()
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Keep an export inside its directory even when the resume name has separators.
fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
