use crate::commands::{
    run_catalog_list, run_catalog_validate, run_guide_render, CatalogArgs, GuideRenderArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use prepper_guide::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Ultimate Prepper Guide",
    about = "Render personalized survival guides and serve the checkout API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with individual guides
    Guide {
        #[command(subcommand)]
        command: GuideCommand,
    },
    /// Inspect checklist datasets
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GuideCommand {
    /// Render a guide PDF for a questionnaire to a file
    Render(GuideRenderArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load every dataset and report validation errors
    Validate(CatalogArgs),
    /// List scenarios with their category and item counts
    List(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Guide {
            command: GuideCommand::Render(args),
        } => run_guide_render(args).await,
        Command::Catalog {
            command: CatalogCommand::Validate(args),
        } => run_catalog_validate(args),
        Command::Catalog {
            command: CatalogCommand::List(args),
        } => run_catalog_list(args),
    }
}
