mod cli;
use cli::{check::check, layout::layout, listen::listen, resolve::resolve, tools::parse_kind};

use clap::{Parser, Subcommand};
use env_logger::Env;
use remote_card::{ControlRef, InteractionKind};

#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Validate a card configuration")]
    Check {
        #[arg(index = 1, value_name = "CONFIG")]
        config: String,
    },
    #[command(about = "Print the rows and controls the card would render")]
    Layout {
        #[arg(index = 1, value_name = "CONFIG")]
        config: String,
        #[arg(short, long, value_name = "STATES")]
        states: Option<String>,
    },
    #[command(about = "Print the action a control would dispatch")]
    Resolve {
        #[arg(index = 1, value_name = "CONFIG")]
        config: String,
        #[arg(index = 2, value_name = "CONTROL")]
        control: ControlRef,
        #[arg(short, long, default_value = "tap", value_parser = parse_kind)]
        action: InteractionKind,
    },
    #[command(visible_alias = "start")]
    #[command(about = "Dispatch interaction events read from stdin")]
    Listen {
        #[arg(index = 1, value_name = "CONFIG")]
        config: String,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => check(config),
        Commands::Layout { config, states } => layout(config, states),
        Commands::Resolve {
            config,
            control,
            action,
        } => resolve(config, control, action),
        Commands::Listen { config } => listen(config),
    }
}
