// fieldmask/src/main.rs
//! fieldmask entry point.
//!
//! Resolves configuration (settings file, then environment, then flags),
//! builds the sanitizer engine and dispatches the subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{debug, LevelFilter};
use std::io;

use fieldmask::cli::{Cli, Commands, ProfilesCommand};
use fieldmask::commands::{hash, profiles, sanitize};
use fieldmask::logger;
use fieldmask::ui::output_format;
use fieldmask::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};
use fieldmask_core::{build_engine, ProfileStore, SanitizerConfig};

fn resolve_config(args: &Cli) -> Result<SanitizerConfig> {
    let base = match &args.config {
        Some(path) => SanitizerConfig::load_from_file(path)?,
        None => SanitizerConfig::default(),
    };
    let mut config = base.apply_env();
    if let Some(root) = &args.config_root {
        config.config_root = root.clone();
    }
    if let Some(profile) = &args.profile {
        config.profile = profile.clone();
    }
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn run(args: Cli, theme_map: &ThemeMap) -> Result<()> {
    let config = resolve_config(&args)?;
    let store = ProfileStore::new(config.config_root.clone());

    match args.command {
        Commands::Sanitize(cmd) => {
            let engine = build_engine(&config, &store).context("Failed to initialize the sanitizer")?;
            let input = sanitize::read_input(cmd.input_file.as_ref())?;
            let opts = sanitize::SanitizeOptions {
                entity: cmd.entity,
                input,
                format: cmd.format,
                output_path: cmd.output,
                pretty: cmd.pretty,
                diff: cmd.diff,
                quiet: args.quiet,
            };
            sanitize::run_sanitize(&engine, opts, theme_map)
        }
        Commands::Profiles(ProfilesCommand::Show { entity }) => {
            profiles::run_show(&store, &config, entity.as_deref())
        }
        Commands::Profiles(ProfilesCommand::Validate) => {
            let summary = profiles::run_validate(&store, &config)?;
            let stderr = io::stderr();
            let supports_color = stderr.is_terminal();
            output_format::print_success_message(&mut stderr.lock(), &summary, theme_map, supports_color)?;
            Ok(())
        }
        Commands::Hash(cmd) => {
            println!("{}", hash::run_hash(&config, &cmd.value)?);
            Ok(())
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else if args.quiet {
        logger::init_logger(Some(LevelFilter::Error));
    } else {
        logger::init_logger(None);
    }

    let theme_map = match build_theme_map(args.theme.as_ref()) {
        Ok(map) => map,
        Err(e) => {
            let fallback = ThemeStyle::default_theme_map();
            sanitize::warn_msg(format!("{:#}; using the default theme.", e), &fallback);
            fallback
        }
    };

    if let Err(e) = run(args, &theme_map) {
        sanitize::error_msg(format!("{:#}", e), &theme_map);
        std::process::exit(1);
    }
}
