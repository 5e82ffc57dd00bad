// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command-line options and resolved runtime configuration.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::io::store::{FileStore, KeyValueStore, MemoryStore};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "reflex", version, about = "Slide prompter for language drills")]
pub struct Cli {
    /// Directory holding saved lessons
    #[arg(long, env = "REFLEX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep lessons in memory only; nothing is saved on exit. Takes
    /// precedence over `--data-dir` and `REFLEX_DATA_DIR`.
    #[arg(long)]
    pub ephemeral: bool,

    /// Open the window full-screen
    #[arg(long)]
    pub fullscreen: bool,

    /// Seconds a status message stays on screen
    #[arg(long, default_value_t = 3)]
    pub message_secs: u64,
}

/// Where lessons are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Directory(PathBuf),
    InMemory,
}

impl StorageLocation {
    /// Open the store this location describes.
    pub fn open(&self) -> Result<Box<dyn KeyValueStore>> {
        match self {
            StorageLocation::Directory(path) => Ok(Box::new(FileStore::open(path)?)),
            StorageLocation::InMemory => {
                log::warn!("Running with in-memory storage; lessons will not be kept");
                Ok(Box::new(MemoryStore::new()))
            }
        }
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageLocation,
    pub start_fullscreen: bool,
    pub message_duration: Duration,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let storage = if cli.ephemeral {
            StorageLocation::InMemory
        } else if let Some(dir) = &cli.data_dir {
            StorageLocation::Directory(dir.clone())
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?;
            StorageLocation::Directory(base.join("reflex"))
        };

        Ok(Self {
            storage,
            start_fullscreen: cli.fullscreen,
            message_duration: Duration::from_secs(cli.message_secs.max(1)),
            window_size: [1280.0, 720.0],
            min_window_size: [800.0, 600.0],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            data_dir: None,
            ephemeral: false,
            fullscreen: false,
            message_secs: 3,
        }
    }

    #[test]
    fn test_explicit_data_dir() {
        let cli = Cli {
            data_dir: Some(PathBuf::from("/tmp/reflex-test")),
            ..cli()
        };
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.storage,
            StorageLocation::Directory(PathBuf::from("/tmp/reflex-test"))
        );
        assert_eq!(config.message_duration, Duration::from_secs(3));
        assert!(!config.start_fullscreen);
    }

    #[test]
    fn test_ephemeral_and_flags() {
        let cli = Cli {
            ephemeral: true,
            fullscreen: true,
            message_secs: 5,
            ..cli()
        };
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.storage, StorageLocation::InMemory);
        assert!(config.start_fullscreen);
        assert_eq!(config.message_duration, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_message_secs_is_raised() {
        let cli = Cli {
            message_secs: 0,
            ..cli()
        };
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.message_duration, Duration::from_secs(1));
    }

    #[test]
    fn test_flags_parse_from_command_line() {
        let cli = Cli::parse_from([
            "reflex",
            "--data-dir",
            "/tmp/x",
            "--fullscreen",
            "--message-secs",
            "7",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(!cli.ephemeral);
        assert!(cli.fullscreen);
        assert_eq!(cli.message_secs, 7);
    }

    #[test]
    fn test_ephemeral_wins_over_data_dir() {
        let cli = Cli::parse_from(["reflex", "--ephemeral", "--data-dir", "/tmp/x"]);
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.storage, StorageLocation::InMemory);
    }

    #[test]
    fn test_directory_location_opens_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let location = StorageLocation::Directory(dir.path().join("data"));
        let mut store = location.open().unwrap();
        store.write("k", "v").unwrap();
        assert!(dir.path().join("data").join("k").exists());
    }
}
