use crate::prelude::*;
use clap::Parser;

mod batch;
mod config;
mod error;
mod extract;
mod prelude;
mod report;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Infer a document title and a ranked heading outline from PDF files"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct Global {
    /// TOML file overriding the pipeline thresholds
    #[clap(long, env = "PDFOUTLINE_CONFIG", global = true)]
    pub config: Option<std::path::PathBuf>,

    /// TOML gazetteer of organizations, events, laws and works to treat as candidates
    #[clap(long, env = "PDFOUTLINE_ENTITIES", global = true)]
    pub entities: Option<std::path::PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "PDFOUTLINE_VERBOSE", global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Process every PDF in a directory, writing one JSON outline per file
    Batch(crate::batch::App),

    /// Extract the outline of a single PDF
    Extract(crate::extract::App),
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    init_logger(app.global.verbose);

    match app.command {
        SubCommands::Batch(sub_app) => crate::batch::run(sub_app, app.global),
        SubCommands::Extract(sub_app) => crate::extract::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
