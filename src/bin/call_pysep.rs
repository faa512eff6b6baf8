use clap::Parser;
use seis_prep::utils::{error::SeisError, logger, validation::Validate};
use seis_prep::{EventRunner, PysepCliConfig, PysepCommand};

#[tokio::main]
async fn main() {
    let args = PysepCliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting call-pysep");

    if let Err(e) = args.validate() {
        fail(&e);
    }

    let runner =
        EventRunner::new(PysepCommand::new(args.pysep_bin.clone())).with_dry_run(args.dry_run);

    match runner.run(&args.file).await {
        Ok(report) => {
            if args.dry_run {
                match serde_json::to_string_pretty(&report.summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(&SeisError::from(e)),
                }
            }
            if let Some(outcome) = report.outcome {
                println!("✅ Pysep finished for {}", report.config_path.display());
                if let Some(dir) = report.summary.output_dir {
                    println!("📁 Output directory: {}", dir);
                }
                tracing::debug!("Run outcome: {:?}", outcome);
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &SeisError) -> ! {
    tracing::error!(
        "❌ Pysep run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
