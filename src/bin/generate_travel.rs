use clap::Parser;
use seis_prep::core::ConfigProvider;
use seis_prep::domain::model::format_float;
use seis_prep::utils::{error::SeisError, logger, validation::Validate};
use seis_prep::{
    CliConfig, ConversionEngine, ConversionSettings, LocalStorage, TravelTimePipeline,
};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting generate-travel");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let settings = match args.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    display_settings(&settings, args.dry_run);

    let pipeline = TravelTimePipeline::new(LocalStorage::default(), settings);
    let engine = ConversionEngine::new(pipeline).with_dry_run(args.dry_run);

    match engine.run().await {
        Ok(report) => {
            let rows = report.result.rows.len();

            if !args.quiet {
                for row in &report.result.rows {
                    println!("{}", format_float(row.travel_time_s));
                }
            }

            match report.output_path {
                Some(path) => {
                    tracing::info!("✅ Travel times computed for {} rows", rows);
                    println!("✅ {} rows converted", rows);
                    println!("📁 Output saved to: {}", path);
                }
                None => {
                    println!("🔍 Dry run: {} rows converted, nothing written", rows);
                    println!("{}", report.result.output);
                }
            }
        }
        Err(e) => fail(&e),
    }
}

fn display_settings(settings: &ConversionSettings, dry_run: bool) {
    println!("📋 Conversion Settings:");
    println!("  Input: {}", settings.input_path().display());
    println!("  Output: {}", settings.output_path().display());
    println!("  Velocity: {} km/s", settings.velocity_km_s());
    println!("  Truncation: {}", settings.truncation());
    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn fail(e: &SeisError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
