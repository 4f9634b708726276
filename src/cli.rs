use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use object_annotator::{Config, DisplayLanguage};

#[derive(Parser, Debug)]
#[command(
    name = "object-annotator",
    about = "Detect objects in an image and draw labelled boxes around them",
    version
)]
pub struct Args {
    /// JPEG or PNG image to annotate
    pub image: PathBuf,

    /// Language of the drawn labels and the tag line
    #[arg(long, short = 'l', value_enum, default_value = "secondary")]
    pub language: DisplayLanguage,

    /// Directory the annotated PNG is written to
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON file holding the vision service KEY and ENDPOINT
    #[arg(long, default_value = "key/secret.json")]
    pub secret: PathBuf,

    /// CJK-capable font asset for primary-language labels
    #[arg(long, required_if_eq("language", "primary"))]
    pub primary_font: Option<PathBuf>,

    /// Font asset for secondary-language labels
    #[arg(long, default_value = "res/fonts/DejaVuSans.ttf")]
    pub secondary_font: PathBuf,

    /// Timeout for each service request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            secret_path: self.secret.clone(),
            primary_font_path: self.primary_font.clone(),
            secondary_font_path: self.secondary_font.clone(),
            output_dir: self.output_dir.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
