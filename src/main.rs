use clap::Parser;
use studio_enroll::adapters::{api::StudentApiClient, console::ConsoleAlerts, viacep::ViaCepLookup};
use studio_enroll::app::interactive::{self, FlowOutcome};
use studio_enroll::utils::{logger, validation::Validate};
use studio_enroll::{CliConfig, EnrollmentSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting studio-enroll");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let config = match config.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let lookup = ViaCepLookup::new(config.lookup_base_url.clone());
    let api = StudentApiClient::new(config.api_base_url.clone());
    let mut session = EnrollmentSession::new(lookup, api, ConsoleAlerts::new());

    match interactive::run(&mut session).await {
        Ok(FlowOutcome::Registered(student)) => {
            tracing::info!("✅ Registration complete");
            if let Some(id) = student.id {
                println!("✅ Student registered with id {}", id);
            } else {
                println!("✅ Student registered");
            }
        }
        Ok(FlowOutcome::Cancelled) => {
            tracing::info!("Registration cancelled by operator");
            println!("Registration cancelled.");
        }
        Err(e) => {
            tracing::error!("❌ Enrollment session failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
