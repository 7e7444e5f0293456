use clap::Parser;
use hasan::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hasan", about = "Terminal chat with the Hasan assistant, backed by Gemini")]
struct Args {
    /// Gemini model to use (overrides GEMINI_MODEL and the config file)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hasan.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hasan.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::HasanConfig::default()
    });
    let resolved = config::resolve(&file_config, args.model.as_deref());

    log::info!(
        "Hasan starting up with model {} at {}",
        resolved.model_name,
        resolved.base_url
    );

    hasan::tui::run(resolved)
}
