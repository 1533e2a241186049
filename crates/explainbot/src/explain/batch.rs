use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use explainbot_core::report::{render_markdown, Outcome, ReportEntry};
use explainbot_core::sample::CodeSample;
use indicatif::{ProgressBar, ProgressStyle};

use crate::prelude::{println, *};
use crate::provider::{ProviderClient, ProviderConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BatchOptions {
    /// Directory containing the files to analyze
    #[arg(default_value = "data/error_codes")]
    pub dir: String,

    /// Path the Markdown report is written to
    #[arg(
        short,
        long,
        env = "EXPLAINBOT_REPORT",
        default_value = "data/error_analysis_report.md"
    )]
    pub output: String,

    /// File extension to include
    #[arg(long, env = "EXPLAINBOT_EXTENSION", default_value = "py")]
    pub extension: String,

    /// Language tag used in prompts and fenced report blocks
    #[arg(long, env = "EXPLAINBOT_LANGUAGE", default_value = super::DEFAULT_LANGUAGE)]
    pub language: String,

    /// Output a JSON summary instead of the table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: BatchOptions, global: crate::Global) -> Result<()> {
    let config = ProviderConfig::from_global(&global)?;
    let client = ProviderClient::new(config)?;

    if global.verbose {
        println!("Provider: {}", client.base_url());
        println!("Model: {}", client.model());
        println!();
    }

    let dir = Path::new(&options.dir);
    if !dir.is_dir() {
        return Err(eyre!(
            "Input directory '{}' does not exist (run `explainbot samples` to create the bundled corpus)",
            options.dir
        ));
    }

    let files = super::list_source_files(dir, &options.extension)?;
    if files.is_empty() {
        println!("No .{} files found in {}", options.extension, options.dir);
        return Ok(());
    }

    // Create spinner for progress indication
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    // Strictly sequential: one blocking exchange per file, entries appended
    // in the sorted enumeration order.
    let mut entries = Vec::with_capacity(files.len());
    for path in &files {
        entries.push(process_file(&client, path, &options.language, Some(&spinner)).await);
    }

    // Clear the spinner before printing output
    spinner.finish_and_clear();

    let document = render_markdown(&entries, &options.language);
    write_report(Path::new(&options.output), &document)?;

    if options.json {
        output_json(&options, &entries)?;
    } else {
        output_summary(&options, &entries);
    }

    Ok(())
}

/// Analyze one file, mapping any failure into a degraded report entry so a
/// single bad file never aborts the batch or disappears from the report.
async fn process_file(
    client: &ProviderClient,
    path: &Path,
    language: &str,
    spinner: Option<&ProgressBar>,
) -> ReportEntry {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let code = match std::fs::read_to_string(path) {
        Ok(code) => code,
        Err(e) => {
            return ReportEntry::failed(filename, String::new(), f!("cannot read file: {e}"));
        }
    };

    let sample = CodeSample::new(filename.clone(), code.clone());
    match analyze_with_retry(client, &sample, language, spinner).await {
        Ok(explanation) => ReportEntry::explained(filename, code, explanation),
        Err(err) => ReportEntry::failed(filename, code, err.to_string()),
    }
}

/// Retry a rate-limited item once after the provider's hint before
/// recording it as failed. Other provider failures are not retried.
async fn analyze_with_retry(
    client: &ProviderClient,
    sample: &CodeSample,
    language: &str,
    spinner: Option<&ProgressBar>,
) -> Result<String, Error> {
    match super::analyze(client, sample, language, spinner).await {
        Err(err) => {
            if let Some(delay) = retry_delay(&err) {
                tokio::time::sleep(delay).await;
                super::analyze(client, sample, language, spinner).await
            } else {
                Err(err)
            }
        }
        ok => ok,
    }
}

/// Pause before retrying, only for rate-limit failures. The provider's
/// hint is honored up to a cap; a missing hint falls back to a short pause.
fn retry_delay(err: &Error) -> Option<Duration> {
    const FALLBACK_SECS: u64 = 2;
    const MAX_SECS: u64 = 30;

    match err {
        Error::RateLimit { retry_after_secs } => Some(Duration::from_secs(
            retry_after_secs.unwrap_or(FALLBACK_SECS).min(MAX_SECS),
        )),
        _ => None,
    }
}

/// Write the rendered document, creating parent directories and
/// overwriting any previous report at the path.
fn write_report(path: &Path, document: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::FileSystem(f!("cannot create {}: {e}", parent.display())))?;
        }
    }

    std::fs::write(path, document)
        .map_err(|e| Error::FileSystem(f!("cannot write {}: {e}", path.display())))
}

fn output_summary(options: &BatchOptions, entries: &[ReportEntry]) {
    let mut table = new_table();
    for entry in entries {
        let status = match &entry.outcome {
            Outcome::Explained(_) => "explained".green(),
            Outcome::Failed(_) => "failed".red(),
        };
        table.add_row(prettytable::row![entry.filename, status]);
    }
    table.printstd();

    let failed = entries.iter().filter(|entry| entry.is_failed()).count();
    println!(
        "\nAnalysis complete! {} of {} files explained. Report saved to {}",
        entries.len() - failed,
        entries.len(),
        options.output
    );
}

fn output_json(options: &BatchOptions, entries: &[ReportEntry]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct FileStatus<'a> {
        filename: &'a str,
        failed: bool,
    }

    #[derive(serde::Serialize)]
    struct BatchOutput<'a> {
        report: &'a str,
        total: usize,
        failed: usize,
        files: Vec<FileStatus<'a>>,
    }

    let output = BatchOutput {
        report: &options.output,
        total: entries.len(),
        failed: entries.iter().filter(|entry| entry.is_failed()).count(),
        files: entries
            .iter()
            .map(|entry| FileStatus {
                filename: &entry.filename,
                failed: entry.is_failed(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{json}");

    Ok(())
}
