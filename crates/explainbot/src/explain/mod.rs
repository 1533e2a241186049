use std::path::{Path, PathBuf};

use explainbot_core::prompt::build_user_prompt;
use explainbot_core::sample::CodeSample;
use indicatif::ProgressBar;

use crate::prelude::{println, *};
use crate::provider::ProviderClient;

pub mod batch;
pub mod samples;
pub mod single;

/// Fixed instruction describing the assistant's persona and constraints.
pub const SYSTEM_PROMPT: &str = "\
You are a programming teaching assistant. When students encounter code errors, you need to:

1. Clearly explain the meaning of the error
2. Analyze why this error occurred
3. Provide conceptual repair suggestions (do not give complete runnable code)
4. Help students understand the underlying programming concepts

Important: Do not provide complete code solutions, but guide students to think and learn.";

/// Default language tag used for prompts and fenced report blocks.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Ask the provider to explain one sample.
///
/// Pure forwarding: prompt assembly happens in the core, then one chat
/// exchange with the fixed system instruction. The sample's syntax is
/// never validated locally.
pub async fn analyze(
    client: &ProviderClient,
    sample: &CodeSample,
    language: &str,
    spinner: Option<&ProgressBar>,
) -> Result<String, Error> {
    if spinner.is_some() {
        set_spinner_msg(spinner, f!("Analyzing {}...", sample.identifier));
    } else {
        println!("Analyzing {}...", sample.identifier);
    }

    let user_prompt = build_user_prompt(sample, language);
    client.explain(SYSTEM_PROMPT, &user_prompt).await
}

/// List regular files under `dir` whose extension matches, sorted by
/// filename so batch output is deterministic regardless of the order the
/// filesystem enumerates entries in.
pub fn list_source_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::FileSystem(f!("cannot read directory {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| Error::FileSystem(f!("cannot read directory {}: {e}", dir.display())))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    Ok(files)
}
