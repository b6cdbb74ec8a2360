mod cli;

use subalign::db::{self, blacklist, history::DbHistory};
use subalign::sync::{MediaId, SyncDisposition, SyncRequest, Syncer};
use subalign::{config, events::EventBus, tools};

use anyhow::Result;
use clap::Parser;
use cli::{BlacklistCommands, Cli, Commands, MediaArgs};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "subalign=trace".to_string()
        } else {
            "subalign=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Sync {
            video,
            subtitle,
            language,
            media,
        } => run_sync(cli.config.as_deref(), video, subtitle, language, media),
        Commands::CheckTools { json } => check_tools(json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Blacklist { command } => run_blacklist(cli.config.as_deref(), command),
    }
}

fn run_sync(
    config_path: Option<&Path>,
    video: PathBuf,
    subtitle: PathBuf,
    language: String,
    media: MediaArgs,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let conn = db::open(&config.db_path)?;
    let history = DbHistory::new(&conn);

    let media = match (media.movie_id, media.series_id, media.episode_id) {
        (Some(movie_id), _, _) => MediaId::Movie { movie_id },
        (_, Some(series_id), Some(episode_id)) => MediaId::Episode {
            series_id,
            episode_id,
        },
        _ => anyhow::bail!("Either --movie-id or --series-id with --episode-id is required"),
    };

    let request = SyncRequest {
        video_path: video,
        subtitle_path: subtitle,
        language,
        media,
    };

    let syncer = Syncer::with_events(&config, EventBus::new());
    match syncer.sync(&request, &history)? {
        SyncDisposition::Synced(report) => {
            println!("{}", report.message);
        }
        SyncDisposition::NotAttempted { tool } => {
            println!("Sync not attempted: {} is not available", tool);
        }
        SyncDisposition::OutputMissing { subtitle_path, .. } => {
            println!(
                "Engine produced no output for {}; subtitle left untouched",
                subtitle_path.display()
            );
        }
        SyncDisposition::Debug(result) => {
            println!(
                "Debug run finished (offset: {:?}, framerate scale factor: {:?})",
                result.offset_seconds, result.framerate_scale_factor
            );
            print!("{}", result.log);
        }
    }

    Ok(())
}

fn check_tools(json: bool) -> Result<()> {
    let tools = tools::check_tools();

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("Checking external tools...\n");
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable synchronization.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    println!("Configuration is valid");
    println!("  log_dir: {}", config.log_dir.display());
    println!("  db_path: {}", config.db_path.display());
    println!("  force_audio: {}", config.subsync.force_audio);
    println!("  debug: {}", config.subsync.debug);
    Ok(())
}

fn run_blacklist(config_path: Option<&Path>, command: BlacklistCommands) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let conn = db::open(&config.db_path)?;
    let events = EventBus::new();

    match command {
        BlacklistCommands::List { series } => {
            let entries = if series {
                blacklist::get_blacklist(&conn)?
            } else {
                blacklist::get_blacklist_movie(&conn)?
            };

            if entries.is_empty() {
                println!("Blacklist is empty");
            }
            for entry in entries {
                println!("{} {}", entry.provider, entry.subs_id);
            }
        }
        BlacklistCommands::AddMovie {
            movie_id,
            provider,
            subs_id,
            language,
        } => {
            blacklist::blacklist_log_movie(
                &conn,
                &events,
                movie_id,
                &provider,
                &subs_id,
                language.as_deref(),
            )?;
            println!("Blacklisted {} {}", provider, subs_id);
        }
        BlacklistCommands::AddEpisode {
            series_id,
            episode_id,
            provider,
            subs_id,
            language,
        } => {
            blacklist::blacklist_log(
                &conn,
                &events,
                series_id,
                episode_id,
                &provider,
                &subs_id,
                language.as_deref(),
            )?;
            println!("Blacklisted {} {}", provider, subs_id);
        }
        BlacklistCommands::Remove {
            provider,
            subs_id,
            series,
        } => {
            if series {
                blacklist::blacklist_delete(&conn, &events, &provider, &subs_id)?;
            } else {
                blacklist::blacklist_delete_movie(&conn, &events, &provider, &subs_id)?;
            }
            println!("Removed {} {}", provider, subs_id);
        }
        BlacklistCommands::Clear { series } => {
            if series {
                blacklist::blacklist_delete_all(&conn, &events)?;
            } else {
                blacklist::blacklist_delete_all_movie(&conn, &events)?;
            }
            println!("Blacklist cleared");
        }
    }

    Ok(())
}
