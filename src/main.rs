use aura::core::config::{self, ResolvedConfig};
use aura::remote::HttpBankingClient;
use aura::shell::{self, Command};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aura", about = "Aura banking client")]
struct Args {
    /// Banking service URL (overrides config and AURA_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}, using defaults");
            config::AuraConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());
    init_logging(&resolved);

    log::info!("Aura starting up against {}", resolved.base_url);

    let client = match HttpBankingClient::new(resolved.base_url.clone(), resolved.timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Could not set up banking client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    match shell::run(args.command, client, &mut stdout).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
