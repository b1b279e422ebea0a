//! Plinth CLI: inspect, price and run builtin functions.

use clap::{Parser as ClapParser, Subcommand};
use plinth_cli::commands;
use plinth_cli::config::{BudgetSection, PlinthConfig};
use plinth_cli::CliError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG: &str = "plinth=info";

fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}

fn gray(s: &str) -> String {
    format!("\x1b[90m{}\x1b[0m", s)
}

#[derive(ClapParser)]
#[command(name = "plinth", version, about = "Plinth builtin functions")]
struct Cli {
    /// Cost model JSON (overrides `cost_model` in plinth.toml)
    #[arg(long, global = true)]
    cost_model: Option<PathBuf>,

    /// CPU limit for `eval` (overrides `[budget] cpu`)
    #[arg(long, global = true)]
    cpu_limit: Option<u64>,

    /// Memory limit for `eval` (overrides `[budget] memory`)
    #[arg(long, global = true)]
    memory_limit: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every builtin with its code, class and signature
    List,
    /// Print the stable code of a builtin
    Encode {
        /// Display name, e.g. addInteger
        name: String,
    },
    /// Name the builtin behind a code (decimal or #hex varint)
    Decode {
        code: String,
    },
    /// Price a call from argument sizes
    Cost {
        name: String,
        /// One abstract memory size per argument
        sizes: Vec<String>,
    },
    /// Charge and apply a builtin to literal arguments
    Eval {
        name: String,
        /// Literals: 42, true, (), #cafe, 'c', "text"
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List builtins the cost model cannot price
    Unpriced,
    /// Print a commented plinth.toml
    Init,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", red("error:"), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let found = PlinthConfig::load_with_path()?;

    let filter = std::env::var("PLINTH_LOG")
        .ok()
        .or_else(|| found.as_ref().and_then(|(_, cfg)| cfg.log.clone()))
        .unwrap_or_else(|| DEFAULT_LOG.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    if let Some((path, _)) = &found {
        tracing::debug!(path = %path.display(), "using config");
    }

    let model_path = cli.cost_model.clone().or_else(|| {
        found
            .as_ref()
            .and_then(|(path, cfg)| cfg.cost_model_path(path))
    });
    let file_budget = found
        .as_ref()
        .map(|(_, cfg)| cfg.budget)
        .unwrap_or_default();
    let limit = file_budget
        .merged(BudgetSection {
            cpu: cli.cpu_limit,
            memory: cli.memory_limit,
        })
        .limit();

    let output = match cli.command {
        Commands::List => commands::list(),
        Commands::Encode { name } => commands::encode(&name)? + "\n",
        Commands::Decode { code } => commands::decode(&code)? + "\n",
        Commands::Cost { name, sizes } => {
            let model = commands::load_cost_model(model_path.as_deref())?;
            commands::cost(&model, &name, &sizes)? + "\n"
        }
        Commands::Eval { name, args } => {
            let model = commands::load_cost_model(model_path.as_deref())?;
            if let Some(limit) = limit {
                tracing::debug!(%limit, "restricting budget");
            }
            commands::eval(&model, &name, &args, limit)?.render()
        }
        Commands::Unpriced => {
            let model = commands::load_cost_model(model_path.as_deref())?;
            commands::unpriced(&model)
        }
        Commands::Init => {
            eprintln!("{}", gray("# save as plinth.toml"));
            PlinthConfig::default_template().to_string()
        }
    };
    print!("{}", output);
    Ok(())
}
