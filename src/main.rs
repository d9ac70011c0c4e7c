use std::sync::Arc;

use inquiry_triage::classifier::GeminiClassifier;
use inquiry_triage::config::TriageConfig;
use inquiry_triage::notify::SmtpNotifier;
use inquiry_triage::pipeline::Router;
use inquiry_triage::store::CsvLogStore;

/// Built-in demo messages: a hot sales lead, a support outage, and spam.
const EXAMPLES: [(&str, &str); 3] = [
    (
        "HOT_LEAD",
        "Hello, we already have management approval for the Enterprise plan \
         and a confirmed budget of $2,000/month. We need to sign the contract \
         today or tomorrow at the latest. Please send pricing and SLA ASAP.",
    ),
    (
        "SUPPORT",
        "Hi, our API requests to /v1/reports started returning 500 errors \
         since this morning. This blocks our production workflow. Please investigate.",
    ),
    (
        "SPAM",
        "Congratulations! You won a free iPhone. Click this link and enter \
         your bank details to receive the prize today!",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TriageConfig::from_env();

    let classifier = GeminiClassifier::from_env(&config.model).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export GEMINI_API_KEY=...");
        std::process::exit(1);
    });

    let log_dir = std::path::absolute(&config.log_dir).unwrap_or_else(|_| config.log_dir.clone());

    eprintln!("📨 Inquiry Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Log store: {}", log_dir.display());
    eprintln!("   Hot lead alerts: {}\n", config.hot_lead_recipient);

    let router = Router::new(
        Arc::new(classifier),
        Arc::new(CsvLogStore::new(&config.log_dir)),
        Arc::new(SmtpNotifier::new(config.smtp.clone())),
        &config.hot_lead_recipient,
    );

    for (name, message) in EXAMPLES {
        eprintln!("--- running example: {name} ---");
        let report = router.run(message, None).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
