mod cli;
mod config;
mod encoder;
mod error;
mod server;
#[cfg(all(test, unix))]
mod test_support;
mod utils;

use clap::Parser;
use cli::Cli;
use config::AppConfig;
use std::path::Path;
use std::process::ExitCode;
use utils::{encoder_available, format_file_size};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = utils::init_logging();

    if cli.list_presets {
        print!("{}", cli::preset_listing());
        return ExitCode::SUCCESS;
    }

    let mut config = AppConfig::load();
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.web {
        return match server::serve(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    let Some(input) = cli.input.as_deref() else {
        if let Err(e) = cli::write_usage(&mut std::io::stdout()) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    run_compress(&cli, input, &config).await
}

async fn run_compress(cli: &Cli, input: &Path, config: &AppConfig) -> ExitCode {
    if !encoder_available(&config.encoder.program) {
        eprintln!(
            "Error: {} is not installed or not in PATH",
            config.encoder.program
        );
        eprintln!("Install with: brew install ffmpeg (macOS) or apt-get install ffmpeg (Linux)");
        return ExitCode::FAILURE;
    }

    let settings = cli.settings();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| encoder::default_output_path(input));

    println!("Compressing {}...", input.display());
    println!("Settings: CRF={}, Preset={}", settings.crf, settings.speed);

    match encoder::compress_file(input, &output, &settings, &config.encoder).await {
        Ok(result) => {
            println!("\nCompression complete!");
            println!("  Output: {}", result.output_file.display());
            println!(
                "  Size: {} -> {}",
                format_file_size(result.input_size),
                format_file_size(result.output_size)
            );
            println!("  Reduction: {}", result.compression_ratio);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nCompression failed:");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
