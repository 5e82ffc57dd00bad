// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transient status messages.
//!
//! A message stays visible for a fixed time and then disappears on its own.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A message shown above the home screen or the editor.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    shown_at: Instant,
    duration: Duration,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text.into(), Severity::Info, duration)
    }

    pub fn error(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text.into(), Severity::Error, duration)
    }

    fn new(text: String, severity: Severity, duration: Duration) -> Self {
        Self {
            text,
            severity,
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.duration
    }

    /// Time until the message expires.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.shown_at.elapsed())
    }
}

/// Draw the message as a coloured banner.
pub fn show(ui: &mut egui::Ui, message: &StatusMessage) {
    let (fill, text_color) = match message.severity {
        Severity::Info => (
            egui::Color32::from_rgb(20, 70, 50),
            egui::Color32::from_rgb(110, 231, 183),
        ),
        Severity::Error => (
            egui::Color32::from_rgb(90, 25, 25),
            egui::Color32::from_rgb(252, 165, 165),
        ),
    };

    egui::Frame::none()
        .fill(fill)
        .rounding(8.0)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(&message.text).strong().color(text_color));
            });
        });
}
