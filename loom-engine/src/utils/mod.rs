//! Process bootstrap helpers

pub mod logger;

use std::path::Path;

use crate::core::EngineConfig;

/// Load `.env`, read the engine configuration and start logging
pub fn setup_environment() -> EngineConfig {
    dotenv::dotenv().ok();
    start(EngineConfig::from_env())
}

/// Same as [`setup_environment`] with an explicit env file
///
/// Variables already present in the process environment win over the file.
pub fn setup_environment_from(env_file: &Path) -> EngineConfig {
    if let Err(e) = dotenv::from_path(env_file) {
        tracing::warn!(path = %env_file.display(), error = %e, "Env file not loaded");
    }
    start(EngineConfig::from_env())
}

fn start(config: EngineConfig) -> EngineConfig {
    logger::init_logger_with_file(Some(&config.log_level), None, config.log_dir.as_deref());
    tracing::info!(group = %config.fabric_content_group, "Engine environment ready");
    config
}
