mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schemaform")]
#[command(version, about = "schemaform CLI - validate records against the showcase forms", long_about = None)]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = "schemaform.toml")]
    config: PathBuf,

    /// Log schema derivation and rejected fields
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that build a form's schema
#[derive(clap::Args)]
pub struct FormArgs {
    /// Form name, see `schemaform list`
    form: String,

    /// Schema parameter as key=value (repeatable)
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// `rules` or `refinements`, for forms that have both
    #[arg(short, long)]
    flavor: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available forms
    List,

    /// Validate one JSON record
    Validate {
        #[command(flatten)]
        form: FormArgs,

        /// JSON record file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Locale for messages (overrides config)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Replay a JSON list of change / submit / params events through a form session
    Replay {
        #[command(flatten)]
        form: FormArgs,

        /// JSON events file
        events: PathBuf,

        /// Validation mode (overrides config)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Locale for messages (overrides config)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Show a form's fields and rules
    Schema {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Mode {
    /// Validate on submit only
    OnSubmit,
    /// Re-validate touched fields on every change
    OnChange,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = schemaform::Config::load(&cli.config)?;
    colored::control::set_override(config.output.color);

    match cli.command {
        Commands::List => {
            commands::list::execute()?;
        }
        Commands::Validate { form, input, locale } => {
            commands::validate::execute(&config, &form, input.as_deref(), locale.as_deref())?;
        }
        Commands::Replay {
            form,
            events,
            mode,
            locale,
        } => {
            let mode = mode.map(|m| match m {
                Mode::OnSubmit => schemaform::ValidationMode::OnSubmit,
                Mode::OnChange => schemaform::ValidationMode::OnChange,
            });
            commands::replay::execute(&config, &form, &events, mode, locale.as_deref())?;
        }
        Commands::Schema { form } => {
            commands::schema::execute(&form)?;
        }
    }

    Ok(())
}
