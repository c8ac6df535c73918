//! Command implementations for the asset-csv CLI
//!
//! Each command is implemented in its own module and shares configuration
//! loading, logging setup and report helpers from [`shared`].

pub mod export;
pub mod import;
pub mod shared;
pub mod template;
pub mod validate;

pub use shared::CommandStats;

use crate::cli::args::Commands;
use crate::Result;

/// Main command runner
///
/// Dispatches to the handler for the chosen subcommand:
/// - `export`: Store records to a dated CSV file
/// - `template`: Bulk-import template with an example row
/// - `validate`: Schema validation of one or more uploads
/// - `import`: Validation followed by an upsert into the store
pub async fn run(command: Commands) -> Result<CommandStats> {
    match command {
        Commands::Export(args) => export::run_export(args).await,
        Commands::Template(args) => template::run_template(args).await,
        Commands::Validate(args) => validate::run_validate(args).await,
        Commands::Import(args) => import::run_import(args).await,
    }
}
