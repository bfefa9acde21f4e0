//! flowsentry entrypoint: load the model registry once, then classify one
//! comma-separated flow record per stdin line until end-of-stream or the
//! terminate sentinel. Artifact-load failure is fatal; row failures are not.

use flowsentry::{
    config::PredictorConfig, logging::StructuredLogger, model::ModelRegistry,
    pipeline::Predictor, stream,
};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("FLOWSENTRY_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PredictorConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(model_dir = ?config.model_dir, "flowsentry starting");

    let mut registry = ModelRegistry::unloaded();
    registry.load(&config)?;
    println!("[INFO] Model loaded successfully");

    let _ = ctrlc::set_handler(|| {
        // The stream is blocking on stdin; treat interrupt like the
        // terminate sentinel.
        std::process::exit(0);
    });

    let predictor = Predictor::new(registry);
    let stdin = std::io::stdin();
    stream::run(
        &predictor,
        stdin.lock(),
        std::io::stdout(),
        std::io::stderr(),
    )?;

    info!("flowsentry stopping");
    Ok(())
}
