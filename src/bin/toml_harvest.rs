use anyhow::Context;
use clap::Parser;
use diamond_harvest::core::ConfigProvider;
use diamond_harvest::core::query::QueryTemplate;
use diamond_harvest::utils::{logger, validation::Validate};
use diamond_harvest::{HarvestEngine, HarvestPipeline, HttpFetcher, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-harvest")]
#[command(about = "Diamond listing harvester driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "harvest.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the last page to harvest
    #[arg(long)]
    last_page: Option<u32>,

    /// Dry run - show what would be requested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based harvest");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(last_page) = args.last_page {
        config.harvest.last_page = last_page;
        tracing::info!("🔧 Last page overridden to: {}", last_page);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be sent");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let fetcher = HttpFetcher::from_config(&config)?;
    let pipeline = HarvestPipeline::new(storage, fetcher, &config)?;
    let engine = HarvestEngine::new_with_monitoring(pipeline, monitor_enabled);

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let pages = config.page_range();
    println!("📋 Configuration Summary:");
    println!("  Harvest: {}", config.harvest.name);
    println!("  Source: {}", config.endpoint());
    println!(
        "  Pages: {}..={} ({} requests)",
        pages.start(),
        pages.end(),
        config.page_count()
    );
    println!("  Payload key: {}", config.payload_key());
    println!("  Output: {}/{}", config.output_path(), config.output_file());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let template = QueryTemplate::new(
        config.endpoint(),
        config.query_parameters(),
        config.page_parameter(),
    )?;
    let pages = config.page_range();

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("📡 Requests:");
    println!("  First: {}", template.url_for(*pages.start()));
    if pages.start() != pages.end() {
        println!("  Last:  {}", template.url_for(*pages.end()));
    }
    println!("  Timeout: {}s per page", config.timeout_seconds());

    println!();
    println!("🔄 Search filters ({}):", config.query_parameters().len());
    for (key, value) in config.query_parameters() {
        if key != template.page_parameter() {
            println!("  {} = {}", key, value);
        }
    }

    println!();
    println!("💾 Output: {}/{}", config.output_path(), config.output_file());
    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
