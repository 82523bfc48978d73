use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "fish-atlas-tui", version, about = "Fish taxonomy explorer TUI")]
pub struct CliArgs {
    /// Print dataset stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override dataset path or URL
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Skip reverse geocoding (habitat shows the fallback text)
    #[arg(long = "no-geocode")]
    pub no_geocode: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("DATASET_PATH", data);
        }
        if self.no_geocode {
            std::env::set_var("GEOCODE_DISABLED", "1");
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
