//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates roots, and runs the classification pass.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::cli::Args;
use crate::config::xml::{CONFIG_ENV, load_config_from_default_xml, load_config_from_xml_env};
use crate::config::{LoadResult, default_config_path, load_or_init, validate_and_normalize};
use crate::errors::ClassifyError;
use crate::logging::init_tracing;
use crate::output as out;
use crate::{classify_tree, shutdown};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!(
                "To override, unset {CONFIG_ENV} or set it to another file."
            ));
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("Default ext_copy config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. Run without --print-config to create a template.",
                    );
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let LoadResult::CreatedTemplate(path) = load_or_init()? {
        out::print_success(&format!(
            "A template ext_copy config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to set `source_root`, `dest_root` and optionally `log_level` and `log_file`, or pass the directories on the command line.",
        );
    }

    // Build config: XML first (explicit env path wins over the default
    // location), then CLI overrides on top.
    let mut cfg = match load_config_from_xml_env()? {
        Some(c) => c,
        None => load_config_from_default_xml()?.unwrap_or_default(),
    };
    args.apply_overrides(&mut cfg);

    // Fewer than two directories resolved: print usage and return without an
    // error status.
    let (Some(_), Some(_)) = (&cfg.source_root, &cfg.dest_root) else {
        out::print_user("Usage: ext_copy <SOURCE_DIR> <DEST_DIR>");
        out::print_user(
            "Copies every regular file under SOURCE_DIR into DEST_DIR/<extension>/, deduplicated by content hash.",
        );
        return Ok(());
    };

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting ext_copy: {:?}", args);

    // Main run (so we can drop the guard after)
    let result = (|| -> Result<()> {
        if let Err(e) = validate_and_normalize(&mut cfg) {
            if let Some(ce) = e.downcast_ref::<ClassifyError>() {
                error!(code = ce.code(), error = %ce, "validation failed");
            } else {
                error!(error = ?e, "validation failed");
            }
            return Err(e);
        }

        let stats = classify_tree(&cfg)?;

        info!(
            copied = stats.copied,
            skipped = stats.skipped,
            errors = stats.errors,
            bytes = stats.bytes,
            "classification finished"
        );
        let verb = if cfg.dry_run { "Would copy" } else { "Copied" };
        out::print_user(&format!(
            "{} {} file(s) ({} bytes), skipped {} duplicate(s), {} error(s)",
            verb, stats.copied, stats.bytes, stats.skipped, stats.errors
        ));
        if stats.errors > 0 {
            out::print_warn("Some files were passed over; see the log for details.");
        }
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
