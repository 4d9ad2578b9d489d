//! Run a single optimization and print the records as JSON.
//!
//! Usage: `optimize-once [beam_library.json]`

use std::process::ExitCode;
use std::sync::Arc;

use beam_optimizer::prelude::*;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServiceConfig::from_env();
    if let Some(path) = std::env::args().nth(1) {
        config.catalog_path = path.into();
    }

    let optimizer = Optimizer::new(
        Arc::new(ModelBridgeClient::new(
            &config.model_url,
            config.model_timeout,
            config.default_load,
        )),
        Arc::new(JsonFileCatalog::new(&config.catalog_path)),
    );

    let output = optimizer
        .run()
        .map_err(|e| e.to_string())
        .and_then(|records| serde_json::to_string_pretty(&records).map_err(|e| e.to_string()));

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", serde_json::json!({ "error": message }));
            ExitCode::FAILURE
        }
    }
}
