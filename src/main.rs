use clap::Parser;
use diamond_harvest::utils::{logger, validation::Validate};
use diamond_harvest::{CliConfig, HarvestEngine, HarvestPipeline, HttpFetcher, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting diamond-harvest CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let fetcher = HttpFetcher::from_config(&config)?;
    let pipeline = HarvestPipeline::new(storage, fetcher, &config)?;
    let engine = HarvestEngine::new_with_monitoring(pipeline, config.monitor);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Harvest completed successfully!");
            println!("✅ Harvest completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Harvest failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            if e.output_untouched() {
                eprintln!("No output file was written.");
            }

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
