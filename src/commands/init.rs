//! Init command - Creates and seeds the data file.

use crate::cli::args::InitArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::FileStorage;

/// Execute the init command
pub async fn execute(args: InitArgs, config: Config) -> AppResult<()> {
    if args.force && tokio::fs::try_exists(&config.data_file).await? {
        tracing::warn!(path = %config.data_file.display(), "Removing existing data file");
        tokio::fs::remove_file(&config.data_file).await?;
    }

    let storage = FileStorage::new(&config.data_file);
    let created = storage.initialize().await?;

    if created {
        println!("Created {}", config.data_file.display());
    } else {
        println!("{} already exists, nothing to do", config.data_file.display());
    }

    Ok(())
}
