use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use food_data_proxy::api;
use food_data_proxy::commands::{system, CommandHandler};
use food_data_proxy::food::api::DEFAULT_MAX_RESULTS;
use food_data_proxy::{FatSecretClient, FatSecretConfig, FoodSearchService};
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serve the HTTP API instead of the interactive prompt
    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,

    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let service = FoodSearchService::new(FatSecretClient::new(FatSecretConfig::from_env()));

    if args.api {
        run_api_server(&args, service).await
    } else {
        run_cli_mode(&args, service).await
    }
}

async fn run_cli_mode(args: &Args, service: FoodSearchService) -> Result<()> {
    let handler = CommandHandler::new(service, args.max_results);
    println!("{}", system::help_text());

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("🥗 ") {
            Ok(line) => {
                let input = line.trim();
                let _ = rl.add_history_entry(input);

                match handler.handle_command(input).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(args: &Args, service: FoodSearchService) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let app = api::create_api(service);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Food API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
