//! CLI interface for the resume analyzer

use crate::model::{AnalysisSettings, AtsMode, ExperienceLevel, GrammarIntensity, LanguageVariant, TargetRole};
use crate::output::{ExportKind, Panel};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Upload a resume for ATS analysis and explore the results")]
#[command(long_about = "Send a resume to the analysis backend, then review its ATS score, suggestions, skills, text quality and keyword coverage, and export reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload and analyze a resume (PDF or DOCX)
    Analyze {
        /// Path to the resume file
        file: PathBuf,

        /// Job description to analyze against (plain text file)
        #[arg(short, long)]
        job_description: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Previously uploaded resumes
    Resumes {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// Re-analyze an uploaded resume against a job description
    Match {
        /// Resume id as shown by `resumes list`
        id: u64,

        /// Job description file
        #[arg(short, long)]
        job_description: PathBuf,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Render panels and exports from a saved JSON export, offline
    Report {
        /// Path to a `REPORT_<file>_data.json` export
        json_file: PathBuf,

        /// File name to show in headers and export names
        #[arg(long)]
        file_name: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Read a shareable analysis link
    Shared {
        url: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ResumeAction {
    /// List uploaded resumes
    List,

    /// Show the analysis of one resume
    Show {
        id: u64,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "api.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Per-run overrides of the configured analysis settings.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Target industry, e.g. "Technology & Software"
    #[arg(short, long)]
    pub industry: Option<String>,

    #[arg(long, value_enum)]
    pub experience_level: Option<ExperienceLevel>,

    #[arg(long, value_enum)]
    pub target_role: Option<TargetRole>,

    /// Grammar check intensity
    #[arg(long, value_enum)]
    pub grammar: Option<GrammarIntensity>,

    #[arg(long, value_enum)]
    pub ats_mode: Option<AtsMode>,

    #[arg(long, value_enum)]
    pub language: Option<LanguageVariant>,

    /// Skip the keyword analysis panel
    #[arg(long)]
    pub no_keywords: bool,

    /// Compare against industry benchmarks
    #[arg(long)]
    pub compare: bool,
}

impl SettingsArgs {
    /// Overlay the flags that were given on top of `settings`.
    pub fn apply(&self, settings: &mut AnalysisSettings) {
        if let Some(industry) = &self.industry {
            settings.industry = Some(industry.clone());
        }
        if self.experience_level.is_some() {
            settings.experience_level = self.experience_level;
        }
        if self.target_role.is_some() {
            settings.target_role = self.target_role;
        }
        if let Some(grammar) = self.grammar {
            settings.grammar_intensity = grammar;
        }
        if let Some(mode) = self.ats_mode {
            settings.ats_mode = mode;
        }
        if let Some(language) = self.language {
            settings.language_variant = language;
        }
        if self.no_keywords {
            settings.include_keyword_analysis = false;
        }
        if self.compare {
            settings.include_industry_comparison = true;
        }
    }
}

/// What to show and write once an analysis is available.
#[derive(Args, Debug, Default)]
pub struct DisplayArgs {
    /// Panels to show; defaults depend on the analysis settings
    #[arg(long = "view", value_enum)]
    pub views: Vec<Panel>,

    /// Artifacts to write to the export directory
    #[arg(short, long = "export", value_enum)]
    pub exports: Vec<ExportKind>,

    /// Print a mailto: link carrying the email digest
    #[arg(long)]
    pub email: bool,

    /// Print a shareable link and its LinkedIn share URL
    #[arg(long)]
    pub share: bool,
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
