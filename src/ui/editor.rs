// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Lesson editor: name the lesson and edit, reorder, add or delete slides.

use crate::models::lesson::{MoveDirection, WorkingLesson};
use crate::models::slide::{SlideId, SlideType, MAX_SLIDE_TEXT};
use crate::util::text;

/// Result of editor interaction.
pub enum EditorAction {
    None,
    Rename(String),
    UpdateText(usize, String),
    UpdateType(usize, SlideType),
    Move(usize, MoveDirection),
    Delete(usize),
    Add,
    SaveAndExit,
    Back,
}

/// Display the editor for the working lesson.
pub fn show(ui: &mut egui::Ui, lesson: &WorkingLesson) -> EditorAction {
    let mut action = EditorAction::None;

    // Header
    ui.horizontal(|ui| {
        if ui.button("⬅ Home").clicked() {
            action = EditorAction::Back;
        }
        ui.heading("Lesson Editor");
        ui.separator();

        let mut name = lesson.name.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut name)
                .hint_text("Lesson Name")
                .desired_width(260.0),
        );
        if response.changed() {
            action = EditorAction::Rename(name);
        }

        let can_save = text::non_blank(&lesson.name).is_some();
        if ui
            .add_enabled(can_save, egui::Button::new("🔖 Save & Exit"))
            .clicked()
        {
            action = EditorAction::SaveAndExit;
        }
    });
    ui.separator();

    let count = lesson.steps.len();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, slide) in lesson.steps.iter().enumerate() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        if ui
                            .add_enabled(index > 0, egui::Button::new("⬆").small())
                            .on_hover_text("Move Up")
                            .clicked()
                        {
                            action = EditorAction::Move(index, MoveDirection::Up);
                        }
                        if ui
                            .add_enabled(index + 1 < count, egui::Button::new("⬇").small())
                            .on_hover_text("Move Down")
                            .clicked()
                        {
                            action = EditorAction::Move(index, MoveDirection::Down);
                        }
                    });

                    ui.label(egui::RichText::new(format!("{}.", index + 1)).monospace());

                    let mut slide_text = slide.text.clone();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut slide_text)
                            .char_limit(MAX_SLIDE_TEXT)
                            .hint_text("e.g. I am not")
                            .desired_width(360.0),
                    );
                    if response.changed() {
                        action = EditorAction::UpdateText(index, slide_text);
                    }
                    ui.label(
                        egui::RichText::new(format!(
                            "{} / {}",
                            text::char_len(&slide.text),
                            MAX_SLIDE_TEXT
                        ))
                        .small()
                        .weak(),
                    );

                    egui::ComboBox::from_id_source(type_picker_id(index, &slide.id))
                        .selected_text(slide.slide_type.label())
                        .show_ui(ui, |ui| {
                            for option in SlideType::BUILTIN {
                                let selected = option == slide.slide_type;
                                if ui.selectable_label(selected, option.label()).clicked()
                                    && !selected
                                {
                                    action = EditorAction::UpdateType(index, option);
                                }
                            }
                        });

                    if ui.button("🗑").on_hover_text("Delete Slide").clicked() {
                        action = EditorAction::Delete(index);
                    }
                });
            });
        }

        ui.add_space(8.0);
        if ui
            .add_sized([ui.available_width(), 40.0], egui::Button::new("➕ Add New Slide"))
            .clicked()
        {
            action = EditorAction::Add;
        }
    });

    action
}

/// Widget id of a slide's type picker. Imported lessons may repeat slide ids.
fn type_picker_id(index: usize, id: &SlideId) -> egui::Id {
    egui::Id::new(("slide_type", index, id))
}
