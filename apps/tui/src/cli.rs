use clap::{CommandFactory, Parser};
use mena_energy_tracker::config::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mena-energy-tracker",
    version,
    about = "Egypt & neighbors comparative energy analysis"
)]
pub struct CliArgs {
    /// Fetch one analysis, print it and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless analysis as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the Gemini model
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Override the Gemini API base URL
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Override the log directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Layer command-line flags over the environment-derived configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model.clone_from(model);
        }
        if let Some(api_base) = &self.api_base {
            config.api_base.clone_from(api_base);
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir.clone_from(dir);
        }
        if self.debug {
            config.debug = true;
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
