// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ReFlex - slide prompter for language drills
//!
//! A desktop application for authoring short-phrase lessons and running
//! them as a full-screen class with a word stock of every phrase seen.

mod app;
mod config;
mod controller;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::ReflexApp;
use clap::Parser;
use config::{AppConfig, Cli};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    let app = ReflexApp::new(&config)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_fullscreen(config.start_fullscreen)
            .with_title("ReFlex - Slide Prompter"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "ReFlex",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
