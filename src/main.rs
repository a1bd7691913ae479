//! resume-analyzer: upload a resume for ATS analysis and explore the results

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_analyzer::analysis::IndustryCatalog;
use resume_analyzer::api::{ApiClient, ResumeService};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, DisplayArgs, ResumeAction};
use resume_analyzer::input::{manager::read_job_description, UploadFile};
use resume_analyzer::model::AnalysisResult;
use resume_analyzer::output::report::{to_email_body, mailto_uri};
use resume_analyzer::output::share::{
    build_shareable_link, linkedin_share_url, parse_shared_link, share_text, share_title,
};
use resume_analyzer::output::{ConsoleFormatter, Panel, ReportGenerator};
use resume_analyzer::session::{Notification, Session, SessionView};
use resume_analyzer::{AnalyzerError, Config, Result};
use std::future::Future;
use std::path::Path;
use std::process;
use std::time::Duration;

const JOB_DESCRIPTION_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    };
    if cli.no_color {
        config.output.color_output = false;
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e.user_message());
        process::exit(1);
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let stored = Config::load_from(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Ok(stored.effective())
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            job_description,
            settings: overrides,
            display,
        } => {
            let mut settings = config.analysis.clone();
            overrides.apply(&mut settings);

            let catalog = load_catalog(&config)?;
            if let Some(industry) = settings.industry.as_deref() {
                if !catalog.is_known_industry(industry) {
                    warn!("Unknown industry '{}', using the general keyword list", industry);
                }
            }

            let upload = UploadFile::from_path(&file).await?;
            let job_description = match job_description.as_deref() {
                Some(path) => {
                    cli::validate_file_extension(path, &JOB_DESCRIPTION_EXTENSIONS)
                        .map_err(|e| AnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
                    read_job_description(Some(path)).await?
                }
                None => None,
            };

            let mut session = Session::new(ApiClient::from_config(&config.api)?, settings);
            let formatter = ConsoleFormatter::new(config.output.color_output);

            info!("Analyzing {}", upload.file_name);
            let outcome = with_spinner(
                format!("Uploading {} for analysis...", upload.file_name),
                session.upload(&upload, job_description.as_deref()),
            )
            .await;
            print_notifications(&mut session, &formatter);
            outcome?;

            present(&session.view(), &formatter, &catalog, &config, &display)
        }

        Commands::Resumes { action } => {
            let client = ApiClient::from_config(&config.api)?;
            let formatter = ConsoleFormatter::new(config.output.color_output);
            match action {
                ResumeAction::List => {
                    let list = with_spinner("Loading resumes...".to_string(), client.get_resumes()).await?;
                    print!("{}", formatter.format_resume_list(&list));
                    Ok(())
                }
                ResumeAction::Show { id, display } => {
                    let catalog = load_catalog(&config)?;
                    let mut session = Session::new(client, config.analysis.clone());
                    let outcome = with_spinner(format!("Loading resume #{}...", id), session.open_resume(id)).await;
                    print_notifications(&mut session, &formatter);
                    outcome?;
                    present(&session.view(), &formatter, &catalog, &config, &display)
                }
            }
        }

        Commands::Match {
            id,
            job_description,
            display,
        } => {
            cli::validate_file_extension(&job_description, &JOB_DESCRIPTION_EXTENSIONS)
                .map_err(|e| AnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            let text = read_job_description(Some(&job_description))
                .await?
                .ok_or_else(|| AnalyzerError::InvalidInput("Job description file is empty".to_string()))?;

            let catalog = load_catalog(&config)?;
            let formatter = ConsoleFormatter::new(config.output.color_output);
            let mut session = Session::new(ApiClient::from_config(&config.api)?, config.analysis.clone());

            let outcome = with_spinner(
                format!("Matching resume #{} against the job description...", id),
                session.analyze_with_job_description(id, &text),
            )
            .await;
            print_notifications(&mut session, &formatter);
            outcome?;
            present(&session.view(), &formatter, &catalog, &config, &display)
        }

        Commands::Report {
            json_file,
            file_name,
            display,
        } => {
            let content = tokio::fs::read_to_string(&json_file).await?;
            let result: AnalysisResult = serde_json::from_str(&content)?;
            let file_name = file_name.unwrap_or_else(|| resume_name_from_export(&json_file));

            let catalog = load_catalog(&config)?;
            let formatter = ConsoleFormatter::new(config.output.color_output);
            let view = SessionView::loaded(&result, &file_name, &config.analysis);
            present(&view, &formatter, &catalog, &config, &display)
        }

        Commands::Shared { url } => {
            let formatter = ConsoleFormatter::new(config.output.color_output);
            let shared = parse_shared_link(&url).ok_or_else(|| {
                AnalyzerError::InvalidInput(format!("Not a shared analysis link: {}", url))
            })?;
            let notification = Notification::info(shared.toast_message());
            println!("{}", formatter.format_notification(&notification));
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("📁 Configuration file: {}", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset to defaults");
                Ok(())
            }
            Some(ConfigAction::Set { key, value }) => {
                // Edit the stored file, not the effective config
                let mut stored = Config::load_from(config_path)?;
                stored.set_value(&key, &value)?;
                stored.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

/// Industry catalog from `catalog_path`, or the built-in one.
fn load_catalog(config: &Config) -> Result<IndustryCatalog> {
    match &config.catalog_path {
        Some(path) => {
            info!("Using industry catalog {}", path.display());
            IndustryCatalog::load(path)
        }
        None => Ok(IndustryCatalog::builtin().clone()),
    }
}

async fn with_spinner<T>(message: String, task: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = task.await;
    spinner.finish_and_clear();
    output
}

fn print_notifications<S: ResumeService>(session: &mut Session<S>, formatter: &ConsoleFormatter) {
    for notification in session.take_notifications() {
        println!("{}", formatter.format_notification(&notification));
    }
}

/// Render the requested panels, then write exports and print links.
fn present(
    view: &SessionView,
    formatter: &ConsoleFormatter,
    catalog: &IndustryCatalog,
    config: &Config,
    display: &DisplayArgs,
) -> Result<()> {
    let panels = if display.views.is_empty() {
        Panel::defaults_for(view.settings)
    } else {
        display.views.clone()
    };
    for panel in panels {
        print!("{}", formatter.format_panel(panel, view, catalog)?);
    }

    let (Some(result), Some(file_name)) = (view.result, view.file_name) else {
        return Ok(());
    };

    if !display.exports.is_empty() {
        let generator = ReportGenerator::new();
        let outcomes = generator.export_all(result, file_name, &display.exports, &config.output.export_dir);
        for outcome in outcomes {
            match outcome.result {
                Ok(path) => println!("📄 {} report saved to {}", outcome.kind, path.display()),
                Err(e) => println!("❌ {} export failed: {}", outcome.kind, e.user_message()),
            }
        }
    }

    if display.email {
        println!("\n📧 {}", mailto_uri(file_name, &to_email_body(result, file_name)));
    }

    if display.share {
        let link = build_shareable_link(&config.output.share_origin, result, file_name);
        println!("\n🔗 {}", share_title(file_name));
        println!("{}", share_text(result));
        println!("{}", link);
        println!("LinkedIn: {}", linkedin_share_url(&link));
    }

    Ok(())
}

/// `REPORT_cv.pdf_data.json` -> `cv.pdf`; other names are used as-is.
fn resume_name_from_export(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.strip_prefix("REPORT_")
        .and_then(|n| n.strip_suffix("_data.json"))
        .map(str::to_string)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resume_name_from_export() {
        assert_eq!(resume_name_from_export(Path::new("out/REPORT_cv.pdf_data.json")), "cv.pdf");
        assert_eq!(resume_name_from_export(Path::new("saved.json")), "saved.json");
    }

    #[test]
    fn test_broken_config_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let message = format!("{:#}", load_config(&path).unwrap_err());
        assert!(message.starts_with("Failed to load configuration from "));
        assert!(message.contains("config.toml"));
        assert!(message.contains("Failed to parse config"));
    }
}
