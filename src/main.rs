mod cli;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use object_annotator::services::{AzureVisionClient, GoogleTranslateClient};
use object_annotator::{Credentials, Pipeline, RenderConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Args;

const GENERIC_FAILURE: &str = "Something went wrong. Please reload and try again.";

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("object_annotator={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{GENERIC_FAILURE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();

    let credentials = Credentials::load(&config.secret_path)?;
    let vision = AzureVisionClient::new(&credentials, config.request_timeout)?;
    let translator = GoogleTranslateClient::new(config.request_timeout)?;
    let pipeline = Pipeline::new(Box::new(vision), Box::new(translator));

    let render_config = RenderConfig::for_language(args.language, &config)?;

    let image_bytes = fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    info!("Annotating {} ({:?})", args.image.display(), args.language);

    let outcome = pipeline.run(&image_bytes, args.language, &render_config)?;

    let download_path = config.download_path();
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;
    fs::write(&download_path, &outcome.png)
        .with_context(|| format!("failed to write {}", download_path.display()))?;

    println!("Annotated image: {}", download_path.display());
    println!("> {}", outcome.tag_line);
    Ok(())
}
