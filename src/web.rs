use ahu_compare::app::{self, Config};
use std::env;
use std::path::PathBuf;

/// Main entry point for the comparison dashboard server.
///
/// # Arguments
/// * `website [data.xlsx] [images-dir] [port]` - all optional
///
/// # Default Configuration
/// * Dataset `Data_2025_2.xlsx`, images directory `images`, port 3000
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = Config {
        data_path: PathBuf::from(args.get(1).map(String::as_str).unwrap_or("Data_2025_2.xlsx")),
        images_dir: PathBuf::from(args.get(2).map(String::as_str).unwrap_or("images")),
        port: args
            .get(3)
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000),
    };

    app::run(config).await
}
