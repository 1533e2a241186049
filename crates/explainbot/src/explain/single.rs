use std::io::{BufRead, IsTerminal};
use std::path::Path;

use colored::Colorize;
use explainbot_core::sample::CodeSample;

use crate::prelude::{println, *};
use crate::provider::{ProviderClient, ProviderConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SingleOptions {
    /// File to analyze; reads code from stdin until an END line when omitted
    pub file: Option<String>,

    /// Error message observed when running the code
    #[arg(short, long)]
    pub error: Option<String>,

    /// Language tag used in the prompt
    #[arg(long, env = "EXPLAINBOT_LANGUAGE", default_value = super::DEFAULT_LANGUAGE)]
    pub language: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SingleOptions, global: crate::Global) -> Result<()> {
    let config = ProviderConfig::from_global(&global)?;
    let client = ProviderClient::new(config)?;

    if global.verbose {
        println!("Provider: {}", client.base_url());
        println!("Model: {}", client.model());
        println!();
    }

    let sample = read_sample(&options)?;
    if sample.body.trim().is_empty() {
        return Err(eyre!("No code provided"));
    }

    // A provider failure is fatal here; only batch mode isolates it.
    let explanation = super::analyze(&client, &sample, &options.language, None).await?;

    if options.json {
        output_json(&sample, &explanation)?;
    } else {
        output_formatted(&sample, &explanation);
    }

    Ok(())
}

fn read_sample(options: &SingleOptions) -> Result<CodeSample, Error> {
    let mut sample = match &options.file {
        Some(file) => {
            let body = std::fs::read_to_string(file)
                .map_err(|e| Error::FileSystem(f!("cannot read {file}: {e}")))?;
            CodeSample::new(display_name(file), body)
        }
        None => CodeSample::new("session", read_code_from_stdin()?),
    };

    if let Some(error) = &options.error {
        sample = sample.with_error(error.clone());
    }

    Ok(sample)
}

/// Identify a file by its basename, falling back to the path as given.
fn display_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

/// Read code lines from stdin until a literal `END` line or EOF.
fn read_code_from_stdin() -> Result<String, Error> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        println!("Enter the code to analyze (finish with a line containing only END):");
    }

    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| Error::FileSystem(f!("cannot read stdin: {e}")))?;
        if line.trim() == "END" {
            break;
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn output_formatted(sample: &CodeSample, explanation: &str) {
    println!("\n{}", "=".repeat(80).bright_cyan());
    println!(
        "{}",
        f!("AI ASSISTANT EXPLANATION: {}", sample.identifier)
            .bright_cyan()
            .bold()
    );
    println!("{}", "=".repeat(80).bright_cyan());
    println!("\n{explanation}");
}

fn output_json(sample: &CodeSample, explanation: &str) -> Result<()> {
    #[derive(serde::Serialize)]
    struct SingleOutput<'a> {
        identifier: &'a str,
        explanation: &'a str,
    }

    let json = serde_json::to_string_pretty(&SingleOutput {
        identifier: &sample.identifier,
        explanation,
    })?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_basename() {
        assert_eq!(display_name("data/error_codes/index_error.py"), "index_error.py");
        assert_eq!(display_name("index_error.py"), "index_error.py");
    }

    #[test]
    fn test_read_sample_from_file_attaches_error_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.py");
        std::fs::write(&path, "print(x)").unwrap();

        let options = SingleOptions {
            file: Some(path.to_string_lossy().into_owned()),
            error: Some("NameError: name 'x' is not defined".to_string()),
            language: "python".to_string(),
            json: false,
        };

        let sample = read_sample(&options).unwrap();
        assert_eq!(sample.identifier, "broken.py");
        assert_eq!(sample.body, "print(x)");
        assert_eq!(
            sample.error_message.as_deref(),
            Some("NameError: name 'x' is not defined")
        );
    }

    #[test]
    fn test_read_sample_missing_file_is_filesystem_error() {
        let options = SingleOptions {
            file: Some("does/not/exist.py".to_string()),
            error: None,
            language: "python".to_string(),
            json: false,
        };

        let err = read_sample(&options).unwrap_err();
        assert!(matches!(err, Error::FileSystem(_)));
    }
}
