use dotenvy::dotenv;
use log::{error, info};
use std::process::ExitCode;

use dramabox_scraper::cli::menu::main_menu;
use dramabox_scraper::cli::output::OutputDir;
use dramabox_scraper::config::AppConfig;
use dramabox_scraper::services::dramabox_service::DramaboxService;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();
    // Initialize logger; stays quiet unless RUST_LOG asks for more
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Dramabox Scraper");
    println!("--> Menghubungkan ke API Server...");

    // No session, nothing else can be signed: stop here.
    let service = match DramaboxService::connect(&config).await {
        Ok(service) => {
            println!("--> Login Berhasil");
            service
        }
        Err(e) => {
            error!("Session bootstrap failed: {}", e);
            println!("--> Gagal Init Token: {}", e);
            println!("Gagal inisialisasi API.");
            return ExitCode::FAILURE;
        }
    };

    let out = OutputDir::new(&config.output_dir);
    info!("Writing results to {}", out.root().display());

    match main_menu(&service, &out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
