use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use txboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct QueryArgs {
    /// Only include transactions in this expense area (repeatable)
    #[arg(short, long = "area", value_name = "AREA")]
    areas: Vec<String>,

    /// First day to include, YYYY-MM-DD
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day to include, YYYY-MM-DD
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Skip this many rows after sorting
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl From<QueryArgs> for txboard::QueryOptions {
    fn from(args: QueryArgs) -> Self {
        txboard::QueryOptions {
            expense_areas: args.areas,
            start: args.start,
            end: args.end,
            offset: args.offset,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Total amount per expense type
    ExpenseTypes(QueryArgs),
    /// Number of transactions per day
    DailyCount(QueryArgs),
    /// Total amount per day
    DailyAmount(QueryArgs),
    /// List the distinct expense areas
    Areas {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show every view at once
    Dashboard(QueryArgs),
}

impl Commands {
    fn into_parts(self) -> (txboard::AppCommand, txboard::QueryOptions) {
        match self {
            Commands::ExpenseTypes(args) => (txboard::AppCommand::ExpenseTypes, args.into()),
            Commands::DailyCount(args) => (txboard::AppCommand::DailyCount, args.into()),
            Commands::DailyAmount(args) => (txboard::AppCommand::DailyAmount, args.into()),
            Commands::Areas { json } => (
                txboard::AppCommand::Areas,
                txboard::QueryOptions {
                    json,
                    ..Default::default()
                },
            ),
            Commands::Dashboard(args) => (txboard::AppCommand::Dashboard, args.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => txboard::cli::setup::setup(),
        Some(cmd) => {
            let (command, options) = cmd.into_parts();
            txboard::run_command(command, cli.config_path.as_deref(), &options).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
