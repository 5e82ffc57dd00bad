// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The application has three modes: the home screen, the lesson editor and
//! a running class. UI components return actions; this module applies them
//! to the lesson controller and switches modes.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

use crate::config::AppConfig;
use crate::controller::{LessonController, RestoreOutcome};
use crate::io::repository::LessonRepository;
use crate::io::transfer::{self, TransferError, TransferFormat};
use crate::models::session::PresentationSession;
use crate::ui::{editor, home, stage, status};
use status::StatusMessage;

/// Current screen.
enum Mode {
    Home,
    Editing,
    Running(PresentationSession),
}

/// Contents of an import file read in the background.
struct LoadedImport {
    path: PathBuf,
    format: TransferFormat,
    contents: String,
}

/// Main application state.
pub struct ReflexApp {
    controller: LessonController,
    mode: Mode,

    /// Transient message shown on the home and editor screens
    status: Option<StatusMessage>,
    message_duration: Duration,

    /// Receiver for background import file reading
    import_loader: Option<Receiver<Result<LoadedImport, String>>>,
}

impl ReflexApp {
    /// Open the store and restore the last active lesson.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let store = config.storage.open()?;
        let mut controller = LessonController::new(LessonRepository::new(store));
        let outcome = controller.restore()?;

        let mut app = Self {
            controller,
            mode: Mode::Home,
            status: None,
            message_duration: config.message_duration,
            import_loader: None,
        };

        match outcome {
            RestoreOutcome::Active(name) | RestoreOutcome::First(name) => {
                log::debug!("Starting with lesson {:?}", name);
            }
            RestoreOutcome::Empty => log::debug!("Starting with no saved lessons"),
            RestoreOutcome::Recovered => {
                app.notify_error("Saved lessons could not be read and were set aside");
            }
        }
        Ok(app)
    }

    fn notify(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text, self.message_duration));
    }

    fn notify_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text, self.message_duration));
    }

    fn session_mut(&mut self) -> Option<&mut PresentationSession> {
        match &mut self.mode {
            Mode::Running(session) => Some(session),
            _ => None,
        }
    }

    fn start_class(&mut self) {
        if let Some(session) = self.controller.start_session() {
            self.mode = Mode::Running(session);
        }
    }

    fn end_class(&mut self, ctx: &egui::Context) {
        if let Mode::Running(session) = std::mem::replace(&mut self.mode, Mode::Home) {
            session.end();
        }
        if is_fullscreen(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        }
    }

    fn edit_lesson(&mut self) {
        if self.controller.ensure_editable() {
            log::debug!("Seeded a placeholder slide for editing");
        }
        self.mode = Mode::Editing;
    }

    fn create_lesson(&mut self) {
        match self.controller.create_blank() {
            Ok(()) => {
                self.mode = Mode::Editing;
                self.notify("Starting a new blank lesson!");
            }
            Err(e) => {
                log::error!("Failed to start a new lesson: {:#}", e);
                self.notify_error(format!("Could not start a new lesson: {e}"));
            }
        }
    }

    fn load_lesson(&mut self, id: &str) {
        match self.controller.load_by_id(id) {
            Ok(Some(name)) => self.notify(format!("Successfully loaded: \"{name}\"")),
            Ok(None) => self.notify_error("That lesson no longer exists"),
            Err(e) => {
                log::error!("Failed to load lesson {}: {:#}", id, e);
                self.notify_error(format!("Could not load lesson: {e}"));
            }
        }
    }

    fn delete_lesson(&mut self, id: &str, name: &str) {
        match self.controller.delete_saved(id) {
            Ok(()) => self.notify(format!("Lesson \"{name}\" deleted locally.")),
            Err(e) => {
                log::error!("Failed to delete lesson {}: {:#}", id, e);
                self.notify_error(format!("Could not delete lesson: {e}"));
            }
        }
    }

    fn save_and_exit(&mut self) {
        let name = self.controller.working().name.clone();
        match self.controller.save(&name) {
            Ok(Some(lesson)) => {
                self.mode = Mode::Home;
                self.notify(format!("Lesson \"{}\" saved locally!", lesson.name));
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to save lesson: {:#}", e);
                self.notify_error(format!("Save failed: {e}"));
            }
        }
    }

    /// Ask for a destination and export every saved lesson.
    fn export_lessons(&mut self) {
        if self.controller.saved_lessons().is_empty() {
            self.notify(TransferError::NothingToExport.to_string());
            return;
        }

        let today = chrono::Local::now().date_naive();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name(transfer::export_file_name(today, TransferFormat::Json))
            .save_file()
        else {
            return;
        };

        match self.controller.export_to(&path) {
            Ok(count) => self.notify(format!("Exported {count} lesson(s)")),
            Err(TransferError::NothingToExport) => {
                self.notify(TransferError::NothingToExport.to_string())
            }
            Err(e) => {
                log::error!("Failed to export lessons: {}", e);
                self.notify_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Ask for a file and read it on a background thread.
    fn import_lessons(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Lessons", &["json", "yaml", "yml"])
            .pick_file()
        else {
            return;
        };

        let (sender, receiver) = channel();
        self.import_loader = Some(receiver);

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedImport, String> {
                let format = TransferFormat::from_path(&path).map_err(|e| e.to_string())?;
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                Ok(LoadedImport {
                    path,
                    format,
                    contents,
                })
            })();

            let _ = sender.send(result);
        });
    }

    /// Merge a finished background read into the saved lessons.
    fn poll_import(&mut self) {
        let Some(receiver) = &self.import_loader else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("import reader stopped unexpectedly".to_string()),
        };
        self.import_loader = None;

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Import read failed: {}", e);
                self.notify_error(format!("Import failed: {e}"));
                return;
            }
        };

        match self.controller.import(&loaded.contents, loaded.format) {
            Ok(0) => self.notify("No new lessons imported (duplicates skipped)"),
            Ok(count) => {
                log::info!("Imported {} lesson(s) from {}", count, loaded.path.display());
                self.notify(format!("Imported {count} new lesson(s)"));
            }
            Err(e) => {
                log::warn!("Rejected import {}: {:#}", loaded.path.display(), e);
                self.notify_error(format!("Import failed: {e}"));
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            toggle_fullscreen(ctx);
        }

        if !matches!(self.mode, Mode::Running(_)) {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.end_class(ctx);
            return;
        }

        let next = ctx.input(|i| {
            i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::Space)
                || i.key_pressed(egui::Key::Enter)
        });
        let previous = ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft));

        if let Some(session) = self.session_mut() {
            if next {
                session.advance();
            } else if previous {
                session.retreat();
            }
        }
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        if let Some(message) = &self.status {
            status::show(ui, message);
            ui.add_space(8.0);
        }
    }

    fn show_home(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                self.show_status(ui);
                if self.import_loader.is_some() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Reading import file...");
                    });
                }
                home::show(ui, &self.controller)
            })
            .inner;

        match action {
            home::HomeAction::StartClass => self.start_class(),
            home::HomeAction::EditLesson => self.edit_lesson(),
            home::HomeAction::CreateLesson => self.create_lesson(),
            home::HomeAction::LoadLesson(id) => self.load_lesson(&id),
            home::HomeAction::DeleteLesson { id, name } => self.delete_lesson(&id, &name),
            home::HomeAction::ExportAll => self.export_lessons(),
            home::HomeAction::ImportFile => self.import_lessons(),
            home::HomeAction::None => {}
        }
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                self.show_status(ui);
                editor::show(ui, self.controller.working())
            })
            .inner;

        match action {
            editor::EditorAction::Rename(name) => self.controller.rename(&name),
            editor::EditorAction::UpdateText(index, text) => {
                self.controller.update_slide_text(index, &text);
            }
            editor::EditorAction::UpdateType(index, slide_type) => {
                self.controller.update_slide_type(index, slide_type);
            }
            editor::EditorAction::Move(index, direction) => {
                self.controller.move_slide(index, direction);
            }
            editor::EditorAction::Delete(index) => {
                self.controller.delete_slide(index);
            }
            editor::EditorAction::Add => {
                self.controller.add_slide();
            }
            editor::EditorAction::SaveAndExit => self.save_and_exit(),
            editor::EditorAction::Back => self.mode = Mode::Home,
            editor::EditorAction::None => {}
        }
    }

    fn show_stage(&mut self, ctx: &egui::Context) {
        let fullscreen = is_fullscreen(ctx);
        let Mode::Running(session) = &self.mode else {
            return;
        };

        stage::show_word_stock(ctx, session);
        let action = egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::from_gray(10)))
            .show(ctx, |ui| stage::show(ui, session, fullscreen))
            .inner;

        match action {
            stage::StageAction::Next => {
                if let Some(session) = self.session_mut() {
                    session.advance();
                }
            }
            stage::StageAction::Previous => {
                if let Some(session) = self.session_mut() {
                    session.retreat();
                }
            }
            stage::StageAction::End => self.end_class(ctx),
            stage::StageAction::ToggleFullscreen => toggle_fullscreen(ctx),
            stage::StageAction::None => {}
        }
    }
}

fn is_fullscreen(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.viewport().fullscreen.unwrap_or(false))
}

fn toggle_fullscreen(ctx: &egui::Context) {
    let target = !is_fullscreen(ctx);
    log::debug!("Requesting fullscreen = {}", target);
    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(target));
}

impl eframe::App for ReflexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_import();
        self.handle_keys(ctx);

        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
        if let Some(message) = &self.status {
            ctx.request_repaint_after(message.remaining());
        }
        if self.import_loader.is_some() {
            ctx.request_repaint();
        }

        match self.mode {
            Mode::Home => self.show_home(ctx),
            Mode::Editing => self.show_editor(ctx),
            Mode::Running(_) => self.show_stage(ctx),
        }
    }
}
