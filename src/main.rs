//! # Pantry Main Entry Point
//!
//! Loads the profile, sets up logging and runs the terminal browser.

use anyhow::Result;
use pantry::cmd_args::CommandLineArgs;
use pantry::config::{self, IniProfileStore};
use pantry::{logging, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();

    let store = IniProfileStore::new(&config::get_profile_path());
    let profile = config::load_profile(&store, &args)?;

    if let Some(log_file) = profile.log_file.as_deref() {
        logging::init_file_logging(log_file, args.verbose())?;
    }
    tracing::info!(
        "Using profile '{}' against {}",
        profile.name,
        profile.base_url
    );

    let mut app = AppController::new(&profile)?;
    app.run().await
}
