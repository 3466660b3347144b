use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pokedex_viewer::api::BASE_URL_ENV;
use pokedex_viewer::session::DEFAULT_QUERY;
use pokedex_viewer::{init_logging, ApiClient, ApiConfig, PokeApi, PokedexSession, ViewState};
use serde::Serialize;
use std::fmt::Display;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "pokedex-viewer", about = "Look up Pokémon and their evolution chains on PokéAPI")]
struct Args {
    /// PokéAPI base URL
    #[arg(long, env = BASE_URL_ENV, default_value = pokedex_viewer::api::DEFAULT_BASE_URL)]
    base_url: String,

    /// Print the view state as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    view: View,
}

#[derive(Subcommand, Debug)]
enum View {
    /// Types, abilities, measurements and base stats
    Info {
        #[arg(default_value = DEFAULT_QUERY)]
        name: String,
    },
    /// Evolution chain with the condition for each step
    Evolution {
        #[arg(default_value = DEFAULT_QUERY)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let client = match ApiClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let session = PokedexSession::new(PokeApi::new(client, ApiConfig::new(args.base_url)));

    match args.view {
        View::Info { name } => show(&session.search_info(&name).await, args.json),
        View::Evolution { name } => show(&session.search_evolution(&name).await, args.json),
    }
}

fn show<T: Display + Serialize>(state: &ViewState<T>, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(state) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("failed to serialize view: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", state);
    }

    if state.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
