use clap::Parser;
use std::env;

use static_tv::audio::{AudioBackend, CueId, TrackId};
use static_tv::error::AppError;
use static_tv::settings::{load_settings, save_settings, settings_path};
use static_tv::ui::{Cli, Command, run_tui};
use static_tv::{core, logging};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.clone() {
        Some(v) => v,
        None => directories::ProjectDirs::from("", "", "static-tv")
            .map(|d| d.data_local_dir().to_path_buf())
            .ok_or_else(|| {
                AppError::DataDir("no usable data directory on this platform".to_owned())
            })?,
    };
    std::fs::create_dir_all(&data_dir)?;

    let no_audio_env = env::var("STATIC_TV_NO_AUDIO")
        .ok()
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false);
    let audio_backend = if cli.no_audio || no_audio_env {
        AudioBackend::Null
    } else {
        AudioBackend::Real
    };

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), "static-tv starting");

    let mut settings = load_settings(&data_dir);
    if let Some(v) = cli.assets_dir.clone() {
        settings.assets_dir = Some(v);
    }
    // Write the defaults on first run so the tunables are discoverable.
    if !settings_path(&data_dir).exists()
        && let Err(e) = save_settings(&data_dir, &settings)
    {
        tracing::warn!(err = %e, "could not write default settings");
    }

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let (tx, rx) = core::spawn_app_actor(&data_dir, settings, audio_backend)?;
            run_tui(tx, rx).await?;
            Ok(())
        }
        Command::CheckAssets => {
            let assets = settings.assets_dir(&data_dir);
            println!("asset dir: {}", assets.display());
            let mut missing = 0usize;
            let names = TrackId::ALL
                .iter()
                .map(|t| t.file_name())
                .chain(CueId::ALL.iter().map(|c| c.file_name()));
            for name in names {
                if assets.join(name).is_file() {
                    println!("  ok       {name}");
                } else {
                    println!("  missing  {name}");
                    missing += 1;
                }
            }
            if missing > 0 {
                println!("{missing} asset(s) missing; the set logs an error and moves on when it reaches one");
            }
            Ok(())
        }
    }
}
