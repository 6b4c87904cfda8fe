use clap::Parser;
use skins_etl::utils::error::{ErrorSeverity, SkinsError};
use skins_etl::utils::{logger, validation::Validate};
use skins_etl::{CliConfig, LocalStorage, RoundRunner, ScoringEngine, SkinsPipeline};

fn exit_with(e: &SkinsError) -> ! {
    tracing::error!(
        "❌ Skins run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("Starting skins-etl");
    tracing::debug!("CLI config: {:?}", config);

    // 載入球場設定（未指定時使用內建球場）
    let profile = match config.load_profile() {
        Ok(profile) => profile,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = profile.validate() {
        exit_with(&e);
    }

    let config = config.resolve_with(&profile);
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let engine = match ScoringEngine::from_profile(&profile) {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };
    tracing::info!(
        "✅ Course '{}' loaded, invalid scores: {}",
        profile.name(),
        engine.policy()
    );

    let dry_run = config.dry_run;
    let storage = LocalStorage::new(".");
    let pipeline = SkinsPipeline::new(storage, config, engine, profile.name());
    let runner = RoundRunner::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        match runner.preview().await {
            Ok(players) => println!("🔍 {} player rows would be scored", players),
            Err(e) => exit_with(&e),
        }
        return;
    }

    match runner.run().await {
        Ok(output_path) => {
            println!("✅ Skins scored successfully!");
            println!("📁 Reports saved to: {}", output_path);
        }
        Err(e) => exit_with(&e),
    }
}
