#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod explain;
mod prelude;
mod provider;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Explain broken code with a hosted language model, without handing out the fix"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// API key for the model provider
    #[clap(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the chat completions API
    #[clap(
        long,
        env = "OPENAI_BASE_URL",
        global = true,
        default_value = "https://api.openai.com/v1"
    )]
    api_base: String,

    /// Model used to produce explanations
    #[clap(long, env = "EXPLAINBOT_MODEL", global = true, default_value = "gpt-3.5-turbo")]
    model: String,

    /// Per-request timeout in seconds
    #[clap(long, env = "EXPLAINBOT_TIMEOUT", global = true, default_value = "60")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "EXPLAINBOT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Analyze one code sample from a file or stdin
    Single(crate::explain::single::SingleOptions),

    /// Analyze every matching file in a directory and write a Markdown report
    Batch(crate::explain::batch::BatchOptions),

    /// Create the bundled corpus of broken sample files
    Samples(crate::explain::samples::SamplesOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Single(options) => crate::explain::single::run(options, app.global).await,
        SubCommands::Batch(options) => crate::explain::batch::run(options, app.global).await,
        SubCommands::Samples(options) => crate::explain::samples::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
