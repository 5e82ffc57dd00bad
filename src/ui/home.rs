// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Home screen: start, edit or create a lesson, and manage saved lessons.

use crate::controller::LessonController;

/// Result of home screen interaction.
pub enum HomeAction {
    None,
    StartClass,
    EditLesson,
    CreateLesson,
    LoadLesson(String),
    DeleteLesson { id: String, name: String },
    ExportAll,
    ImportFile,
}

const BUTTON_HEIGHT: f32 = 44.0;

/// Display the home screen.
pub fn show(ui: &mut egui::Ui, controller: &LessonController) -> HomeAction {
    let mut action = HomeAction::None;
    let working = controller.working();

    ui.vertical_centered(|ui| {
        ui.set_max_width(560.0);
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new("ReFlex")
                .size(48.0)
                .strong()
                .color(egui::Color32::from_rgb(129, 140, 248)),
        );
        ui.label(
            egui::RichText::new(format!("Current lesson: {}", working.name))
                .italics()
                .weak(),
        );
        ui.add_space(16.0);

        let width = ui.available_width();
        let start = egui::Button::new(egui::RichText::new("▶ Start Class").size(20.0).strong())
            .min_size(egui::vec2(width * 0.6, BUTTON_HEIGHT));
        if ui.add_enabled(working.can_start(), start).clicked() {
            action = HomeAction::StartClass;
        }

        let edit = egui::Button::new(egui::RichText::new("⚙ Edit Lesson").size(16.0))
            .min_size(egui::vec2(width * 0.8, BUTTON_HEIGHT));
        if ui.add(edit).clicked() {
            action = HomeAction::EditLesson;
        }

        let create = egui::Button::new(egui::RichText::new("➕ Create New Lesson").size(16.0))
            .min_size(egui::vec2(width, BUTTON_HEIGHT));
        if ui.add(create).clicked() {
            action = HomeAction::CreateLesson;
        }

        ui.add_space(20.0);
        ui.separator();
        ui.heading("Saved Lessons");

        let saved = controller.saved_lessons();
        if saved.is_empty() {
            ui.label(egui::RichText::new("No lessons saved yet.").weak());
        } else {
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    for lesson in saved {
                        let is_current = controller.is_active(&lesson.id);
                        ui.horizontal(|ui| {
                            let name = egui::RichText::new(&lesson.name);
                            let name = if is_current {
                                name.strong().color(egui::Color32::from_rgb(52, 211, 153))
                            } else {
                                name
                            };
                            ui.label(name);
                            ui.label(
                                egui::RichText::new(format!("{} slides", lesson.steps.len()))
                                    .small()
                                    .weak(),
                            );

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("🗑").on_hover_text("Delete Lesson").clicked() {
                                    action = HomeAction::DeleteLesson {
                                        id: lesson.id.clone(),
                                        name: lesson.name.clone(),
                                    };
                                }
                                let label = if is_current { "Current" } else { "Load" };
                                if ui.add_enabled(!is_current, egui::Button::new(label)).clicked() {
                                    action = HomeAction::LoadLesson(lesson.id.clone());
                                }
                            });
                        });
                    }
                });
        }

        ui.add_space(12.0);
        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!saved.is_empty(), egui::Button::new("⬇ Export All Lessons"))
                .clicked()
            {
                action = HomeAction::ExportAll;
            }
            if ui.button("⬆ Import Lessons").clicked() {
                action = HomeAction::ImportFile;
            }
        });
        ui.label(
            egui::RichText::new("Backup your lessons or transfer to another computer")
                .small()
                .weak(),
        );
    });

    action
}
