use clap::Parser;
use tidysched::utils::{logger, validation::Validate};
use tidysched::{Cli, EngineError, EngineRequest, HttpRecordStore, SchedulingEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting tidysched");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.store_settings().and_then(|s| {
        s.validate()?;
        Ok(s)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let store = match HttpRecordStore::new(&settings) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };
    let engine = SchedulingEngine::new(store);

    let outcome = match cli.command.to_request() {
        Ok(EngineRequest::Generate(req)) => engine
            .generate(&req)
            .await
            .map(|r| (r.success, r.message)),
        Ok(EngineRequest::Sync(req)) => engine.sync(&req).await.map(|r| (r.success, r.message)),
        Ok(EngineRequest::Reschedule(req)) => engine
            .reschedule(&req)
            .await
            .map(|r| (r.success, r.message)),
        Err(e) => Err(e),
    };

    match outcome {
        Ok((true, message)) => {
            tracing::info!("✅ {}", message);
            println!("✅ {}", message);
        }
        Ok((false, message)) => {
            tracing::error!("❌ {}", message);
            eprintln!("❌ {}", message);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(
                "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

fn exit_code(e: &EngineError) -> i32 {
    match e.severity() {
        tidysched::utils::error::ErrorSeverity::Low => 0,
        tidysched::utils::error::ErrorSeverity::Medium => 2,
        tidysched::utils::error::ErrorSeverity::High => 1,
        tidysched::utils::error::ErrorSeverity::Critical => 3,
    }
}
