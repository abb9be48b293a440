//! GrandPad Archiver - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use grandpad_archiver::{
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Result},
    fs::absolute_dir,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_success,
        print_sync_stats, print_warning,
    },
    JsonFileSink, SyncOrchestrator,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let records_dir = config.records_directory();
    print_config_summary(
        &config.account.email,
        &config.api.url,
        &absolute_dir(&config.output.media_folder).display().to_string(),
        &records_dir.display().to_string(),
    );

    print_info("Connecting to GrandPad...");
    let orchestrator = SyncOrchestrator::new(config, JsonFileSink::new(records_dir));
    let stats = orchestrator.run().await?;

    print_sync_stats(&stats);
    print_success("Archive complete");

    Ok(())
}
