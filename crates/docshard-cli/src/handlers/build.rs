//! Build command handler

use crate::cli::{BuildArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::{self, timing::Timer};
use crate::output::OutputWriter;
use docshard_core::{generate, ChunkLimits, GenerateOptions};
use tracing::{info, instrument};

/// Handle the build command
#[instrument(skip(config, output), fields(file = %args.document.display()))]
pub fn handle_build(args: BuildArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("build_command", &format!("file: {}", args.document.display()));
    info!("Starting build");
    output.info(&format!("Converting {}", args.document.display()))?;

    let doc = {
        let _load_timer = Timer::new("document_loading");
        super::load_document(&args.document)?
    };

    // CLI flags override file config, which overrides the defaults.
    let options = GenerateOptions {
        source_label: args.document.display().to_string(),
        out_dir: args.out.unwrap_or_else(|| config.build.out_dir.clone()),
        limits: ChunkLimits {
            token_budget: args.budget.unwrap_or(config.build.chunk_token_budget),
            min_ops_per_chunk: args.min_ops.unwrap_or(config.build.min_ops_per_chunk),
        },
        index_title: args.title,
        run_id: logging::current_run_id().map(str::to_owned),
    };
    info!(
        out_dir = %options.out_dir.display(),
        token_budget = options.limits.token_budget,
        min_ops_per_chunk = options.limits.min_ops_per_chunk,
        "Generation options resolved"
    );

    let progress = output.spinner("Rendering operation shards...");
    let summary = {
        let _generate_timer = Timer::new("generation");
        generate(&doc, &options)?
    };
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    output.success("✓ Conversion completed successfully")?;
    if summary.operations == 0 {
        output.warning("⚠ No operations found; only schema pages were generated")?;
    }
    match output.format() {
        OutputFormat::Human => {
            output.section("Generation Summary")?;
            output.generation_summary(&summary)?;
        }
        _ => {
            output.generation_summary(&summary)?;
        }
    }

    Ok(())
}
