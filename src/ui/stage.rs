// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Running class view.
//!
//! The current slide fills the central area; the word stock lists every
//! phrase of the lesson in a side panel.

use crate::models::session::PresentationSession;

/// Result of stage interaction.
pub enum StageAction {
    None,
    Next,
    Previous,
    End,
    ToggleFullscreen,
}

/// Display the word stock side panel.
pub fn show_word_stock(ctx: &egui::Context, session: &PresentationSession) {
    egui::SidePanel::right("word_stock")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("🔊 Word Stock");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                if session.word_stock().is_empty() {
                    ui.label(
                        egui::RichText::new(
                            "The slide phrases will appear here once you start the class.",
                        )
                        .italics()
                        .weak(),
                    );
                }
                for phrase in session.word_stock() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.add(egui::Label::new(egui::RichText::new(phrase).size(18.0)).wrap());
                    });
                }
            });
        });
}

/// Display the current slide and the navigation controls.
pub fn show(ui: &mut egui::Ui, session: &PresentationSession, is_fullscreen: bool) -> StageAction {
    let mut action = StageAction::None;

    ui.add(egui::ProgressBar::new(session.progress()));

    ui.horizontal(|ui| {
        if ui.button("⟲ End Class (Esc)").clicked() {
            action = StageAction::End;
        }
        let label = if is_fullscreen {
            "Exit Fullscreen (F11)"
        } else {
            "Fullscreen (F11)"
        };
        if ui.button(label).clicked() {
            action = StageAction::ToggleFullscreen;
        }
        ui.label(
            egui::RichText::new(format!("{} / {}", session.cursor() + 1, session.len())).weak(),
        );
    });

    let slide = session.current_slide();
    let controls_height = 72.0;
    let stage_height = (ui.available_height() - controls_height).max(0.0);
    ui.allocate_ui(egui::vec2(ui.available_width(), stage_height), |ui| {
        ui.centered_and_justified(|ui| {
            let size = (ui.available_width() / 10.0).clamp(32.0, 128.0);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(&slide.text)
                        .size(size)
                        .strong()
                        .color(egui::Color32::WHITE),
                )
                .wrap(),
            );
        });
    });

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let next = egui::Button::new(egui::RichText::new("▶").size(28.0))
            .min_size(egui::vec2(64.0, 56.0));
        if ui.add_enabled(!session.is_at_end(), next).clicked() {
            action = StageAction::Next;
        }
        let previous = egui::Button::new(egui::RichText::new("◀").size(28.0))
            .min_size(egui::vec2(64.0, 56.0));
        if ui.add_enabled(!session.is_at_start(), previous).clicked() {
            action = StageAction::Previous;
        }
    });

    action
}
