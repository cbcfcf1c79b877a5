use std::path::Path;
use std::sync::Arc;

use callsmith::clock::SystemClock;
use callsmith::config::PlatformConfig;
use callsmith::error::ProvisioningError;
use callsmith::model::OnboardingConfiguration;
use callsmith::platform::{HttpAgentPlatform, RemoteAgentPlatform};
use callsmith::provision::Orchestrator;
use callsmith::store::{LibSqlRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: callsmith <onboarding-config.json>");
        std::process::exit(2);
    });

    let raw = tokio::fs::read_to_string(&config_path).await?;
    let config: OnboardingConfiguration = serde_json::from_str(&raw)?;

    let platform_config = PlatformConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export CALLSMITH_PLATFORM_API_KEY=...");
        std::process::exit(1);
    });

    let db_path =
        std::env::var("CALLSMITH_DB_PATH").unwrap_or_else(|_| "./data/callsmith.db".to_string());

    eprintln!("📞 Callsmith v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Config: {config_path}");
    eprintln!("   Vertical: {}", config.vertical);
    eprintln!("   Platform: {}", platform_config.base_url);
    eprintln!("   Database: {db_path}\n");

    let store: Arc<dyn RecordStore> =
        Arc::new(LibSqlRecordStore::new_local(Path::new(&db_path)).await?);
    let platform: Arc<dyn RemoteAgentPlatform> =
        Arc::new(HttpAgentPlatform::new(platform_config)?);

    let orchestrator = Orchestrator::new(platform, store, Arc::new(SystemClock));

    match orchestrator.provision(&config).await {
        Ok(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        Err(ProvisioningError::Validation(issues)) => {
            eprintln!("Configuration is invalid:");
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Provisioning failed: {e}");
            std::process::exit(1);
        }
    }
}
