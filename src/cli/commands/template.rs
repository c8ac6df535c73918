//! Template command implementation

use super::shared::{CommandStats, load_configuration, print_json, setup_logging};
use crate::app::adapters::FileSystemSink;
use crate::app::services::csv_engine::{generate_template, template_base_name, trigger_download};
use crate::cli::args::{OutputFormat, TemplateArgs};
use crate::Result;
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Template command runner
///
/// Writes `<kind>-import-template-<date>.csv`, or prints the template when
/// `--stdout` is given.
pub async fn run_template(args: TemplateArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let mut config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config);
    debug!("Template arguments: {:?}", args);

    let template = generate_template(args.kind);

    if args.stdout {
        println!("{}", template);
        return Ok(CommandStats {
            processing_time: start_time.elapsed(),
            ..Default::default()
        });
    }

    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    config.validate()?;

    let mut sink = FileSystemSink::new(&config.export.output_dir);
    let path = trigger_download(&mut sink, &template, &template_base_name(args.kind))?;
    info!("Wrote {} import template", args.kind);

    let stats = CommandStats {
        output_files: vec![path.clone()],
        processing_time: start_time.elapsed(),
        ..Default::default()
    };

    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                println!(
                    "{} Wrote {} import template to {}",
                    "✔".bright_green().bold(),
                    args.kind,
                    path.display()
                );
            }
        }
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(stats)
}
