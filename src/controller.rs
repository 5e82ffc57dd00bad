// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Working lesson controller.
//!
//! Owns the lesson open in the editor and keeps it in step with the saved
//! collection and the active lesson pointer. The UI calls these methods in
//! response to user actions and never touches the repository directly.

use anyhow::{Context, Result};
use std::path::Path;

use crate::io::repository::LessonRepository;
use crate::io::transfer::{self, ImportOutcome, TransferFormat};
use crate::models::lesson::{Lesson, MoveDirection, WorkingLesson};
use crate::models::session::PresentationSession;
use crate::models::slide::SlideType;
use crate::util::text;

/// What startup found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The lesson named by the active pointer was loaded.
    Active(String),
    /// No usable pointer; the first saved lesson was loaded.
    First(String),
    /// Nothing saved; the untitled lesson is open.
    Empty,
    /// Saved data could not be read and was set aside.
    Recovered,
}

pub struct LessonController {
    repository: LessonRepository,
    working: WorkingLesson,
    saved: Vec<Lesson>,
}

impl LessonController {
    pub fn new(repository: LessonRepository) -> Self {
        Self {
            repository,
            working: WorkingLesson::untitled(),
            saved: Vec::new(),
        }
    }

    pub fn working(&self) -> &WorkingLesson {
        &self.working
    }

    /// Saved lessons in insertion order, as last read from the store.
    pub fn saved_lessons(&self) -> &[Lesson] {
        &self.saved
    }

    /// Whether `id` is the lesson currently open.
    pub fn is_active(&self, id: &str) -> bool {
        self.working.id.as_deref() == Some(id)
    }

    /// Pick the working lesson at startup.
    pub fn restore(&mut self) -> Result<RestoreOutcome> {
        if self.repository.quarantine_malformed()? {
            self.saved.clear();
            self.reset_working()?;
            return Ok(RestoreOutcome::Recovered);
        }

        self.saved = self.repository.try_list_all()?;
        let pointer = self.repository.active_id()?;

        let active = pointer
            .as_deref()
            .and_then(|id| self.saved.iter().find(|l| l.id == id))
            .cloned();
        if let Some(lesson) = active {
            self.install(&lesson)?;
            log::info!("Restored active lesson {:?}", lesson.name);
            return Ok(RestoreOutcome::Active(lesson.name));
        }

        if let Some(first) = self.saved.first().cloned() {
            self.install(&first)?;
            log::info!("No active lesson recorded, opened {:?}", first.name);
            return Ok(RestoreOutcome::First(first.name));
        }

        self.reset_working()?;
        Ok(RestoreOutcome::Empty)
    }

    /// Re-read the saved collection from the store.
    pub fn refresh(&mut self) {
        self.saved = self.repository.list_all();
    }

    /// Start a new unsaved lesson with one placeholder slide.
    pub fn create_blank(&mut self) -> Result<()> {
        self.working = WorkingLesson::blank();
        self.repository.set_active(None)?;
        log::info!("Started a new blank lesson");
        Ok(())
    }

    /// Open a saved lesson for editing and presenting.
    pub fn load_from(&mut self, lesson: &Lesson) -> Result<()> {
        self.install(lesson)?;
        log::info!("Loaded lesson {:?} ({} slides)", lesson.name, lesson.steps.len());
        Ok(())
    }

    /// Open the saved lesson with `id`. Returns `None` if it no longer exists.
    pub fn load_by_id(&mut self, id: &str) -> Result<Option<String>> {
        match self.repository.find_by_id(id) {
            Some(lesson) => {
                self.load_from(&lesson)?;
                Ok(Some(lesson.name))
            }
            None => {
                self.refresh();
                Ok(None)
            }
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.working.name = name.to_string();
    }

    pub fn add_slide(&mut self) -> usize {
        let index = self.working.add_slide();
        log::debug!("Added slide {}", index);
        index
    }

    pub fn delete_slide(&mut self, index: usize) -> bool {
        let changed = self.working.delete_slide(index);
        if changed {
            log::debug!("Deleted slide {}, {} left", index, self.working.steps.len());
        }
        changed
    }

    pub fn move_slide(&mut self, index: usize, direction: MoveDirection) -> bool {
        let changed = self.working.move_slide(index, direction);
        if changed {
            log::debug!("Moved slide {} {:?}", index, direction);
        }
        changed
    }

    pub fn update_slide_text(&mut self, index: usize, text: &str) -> bool {
        self.working.update_slide_text(index, text)
    }

    pub fn update_slide_type(&mut self, index: usize, slide_type: SlideType) -> bool {
        self.working.update_slide_type(index, slide_type)
    }

    /// Give a lesson without slides a placeholder before it is edited.
    pub fn ensure_editable(&mut self) -> bool {
        self.working.ensure_editable()
    }

    /// Save the working lesson under `display_name`.
    ///
    /// Returns `None` without touching anything if the name is blank or
    /// the lesson has no slides.
    pub fn save(&mut self, display_name: &str) -> Result<Option<Lesson>> {
        let Some(name) = text::non_blank(display_name) else {
            return Ok(None);
        };
        if self.working.steps.is_empty() {
            log::debug!("Not saving {:?}: lesson has no slides", name);
            return Ok(None);
        }
        let id = self
            .working
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let lesson = self.working.to_lesson(id, name, chrono::Utc::now());

        self.saved = self
            .repository
            .upsert(lesson.clone())
            .context("Failed to save lesson")?;
        self.repository.set_active(Some(&lesson.id))?;
        self.working.id = Some(lesson.id.clone());
        self.working.name = lesson.name.clone();

        log::info!("Saved lesson {:?} ({} slides)", lesson.name, lesson.steps.len());
        Ok(Some(lesson))
    }

    /// Delete a saved lesson. Deleting the open lesson resets the editor.
    pub fn delete_saved(&mut self, id: &str) -> Result<()> {
        self.saved = self
            .repository
            .remove(id)
            .context("Failed to delete lesson")?;
        if self.is_active(id) {
            self.reset_working()?;
        }
        log::info!("Deleted lesson {}", id);
        Ok(())
    }

    /// Export every saved lesson to `path`. Returns the number written.
    pub fn export_to(&self, path: &Path) -> Result<usize, transfer::TransferError> {
        let count = transfer::export_to_path(&self.saved, path)?;
        log::info!("Exported {} lesson(s) to {}", count, path.display());
        Ok(count)
    }

    /// Merge an imported file into the saved lessons.
    ///
    /// Nothing is written when the file fails validation.
    pub fn import(&mut self, raw: &str, format: TransferFormat) -> Result<usize> {
        let ImportOutcome {
            merged,
            imported_count,
        } = transfer::import_blob(raw, format, &self.repository.list_all())?;
        if imported_count > 0 {
            self.repository
                .replace_all(&merged)
                .context("Failed to store imported lessons")?;
        }
        self.refresh();
        log::info!("Imported {} new lesson(s)", imported_count);
        Ok(imported_count)
    }

    /// Begin a class from the working lesson, if it has slides.
    pub fn start_session(&self) -> Option<PresentationSession> {
        let session = PresentationSession::start(&self.working)?;
        log::info!(
            "Class started: {:?}, {} slides, {} phrases in stock",
            self.working.name,
            session.len(),
            session.word_stock().len()
        );
        Some(session)
    }

    fn install(&mut self, lesson: &Lesson) -> Result<()> {
        self.working = WorkingLesson::from_lesson(lesson);
        self.repository.set_active(Some(&lesson.id))
    }

    fn reset_working(&mut self) -> Result<()> {
        self.working = WorkingLesson::untitled();
        self.repository.set_active(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::repository::{ACTIVE_LESSON_KEY, LESSONS_KEY};
    use crate::io::store::{KeyValueStore, MemoryStore};
    use crate::models::lesson::{NEW_LESSON_NAME, UNTITLED_LESSON_NAME};
    use crate::models::slide::Slide;

    fn controller() -> LessonController {
        LessonController::new(LessonRepository::new(Box::new(MemoryStore::new())))
    }

    fn controller_over(store: MemoryStore) -> LessonController {
        LessonController::new(LessonRepository::new(Box::new(store)))
    }

    fn saved_lesson(id: &str, name: &str, texts: &[&str]) -> Lesson {
        Lesson {
            id: id.to_string(),
            name: name.to_string(),
            steps: texts.iter().map(|t| Slide::new(*t)).collect(),
            updated_at: None,
        }
    }

    fn store_with(lessons: &[Lesson], active: Option<&str>) -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .write(LESSONS_KEY, &serde_json::to_string(lessons).unwrap())
            .unwrap();
        if let Some(id) = active {
            store.write(ACTIVE_LESSON_KEY, id).unwrap();
        }
        store
    }

    #[test]
    fn test_restore_empty_store() {
        let mut ctl = controller();
        assert_eq!(ctl.restore().unwrap(), RestoreOutcome::Empty);
        assert_eq!(ctl.working().name, UNTITLED_LESSON_NAME);
        assert!(ctl.working().steps.is_empty());
        assert!(ctl.start_session().is_none());
    }

    #[test]
    fn test_restore_follows_active_pointer() {
        let lessons = [
            saved_lesson("a", "First", &["one"]),
            saved_lesson("b", "Second", &["two"]),
        ];
        let mut ctl = controller_over(store_with(&lessons, Some("b")));
        assert_eq!(
            ctl.restore().unwrap(),
            RestoreOutcome::Active("Second".to_string())
        );
        assert_eq!(ctl.working().id.as_deref(), Some("b"));
        assert_eq!(ctl.saved_lessons().len(), 2);
    }

    #[test]
    fn test_restore_falls_back_to_first_lesson() {
        let lessons = [
            saved_lesson("a", "First", &["one"]),
            saved_lesson("b", "Second", &["two"]),
        ];
        let mut ctl = controller_over(store_with(&lessons, Some("gone")));
        assert_eq!(
            ctl.restore().unwrap(),
            RestoreOutcome::First("First".to_string())
        );
        assert!(ctl.is_active("a"));
        assert_eq!(ctl.repository.active_id().unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_restore_recovers_from_malformed_storage() {
        let mut store = MemoryStore::new();
        store.write(LESSONS_KEY, "[{broken").unwrap();
        store.write(ACTIVE_LESSON_KEY, "a").unwrap();
        let mut ctl = controller_over(store);

        assert_eq!(ctl.restore().unwrap(), RestoreOutcome::Recovered);
        assert!(ctl.saved_lessons().is_empty());
        assert_eq!(ctl.repository.active_id().unwrap(), None);

        ctl.create_blank().unwrap();
        assert!(ctl.save("Fresh").unwrap().is_some());
        assert_eq!(ctl.saved_lessons().len(), 1);
    }

    #[test]
    fn test_create_blank_clears_pointer() {
        let lessons = [saved_lesson("a", "First", &["one"])];
        let mut ctl = controller_over(store_with(&lessons, Some("a")));
        ctl.restore().unwrap();

        ctl.create_blank().unwrap();
        assert_eq!(ctl.working().id, None);
        assert_eq!(ctl.working().name, NEW_LESSON_NAME);
        assert_eq!(ctl.working().steps.len(), 1);
        assert_eq!(ctl.repository.active_id().unwrap(), None);
    }

    #[test]
    fn test_save_round_trip() {
        let mut ctl = controller();
        ctl.create_blank().unwrap();
        ctl.update_slide_text(0, "I am");
        ctl.add_slide();
        ctl.update_slide_text(1, "You are");
        ctl.update_slide_type(1, SlideType::Question);

        let saved = ctl.save("  Verb drill  ").unwrap().unwrap();
        assert_eq!(saved.name, "Verb drill");
        assert!(saved.updated_at.is_some());

        let found = ctl.repository.find_by_id(&saved.id).unwrap();
        assert_eq!(found.steps, ctl.working().steps);
        assert_eq!(found.name, "Verb drill");
        assert_eq!(ctl.working().id.as_deref(), Some(saved.id.as_str()));
        assert_eq!(
            ctl.repository.active_id().unwrap().as_deref(),
            Some(saved.id.as_str())
        );
    }

    #[test]
    fn test_save_again_keeps_identity() {
        let mut ctl = controller();
        ctl.create_blank().unwrap();
        let first = ctl.save("Drill").unwrap().unwrap();
        ctl.add_slide();
        let second = ctl.save("Drill v2").unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(ctl.saved_lessons().len(), 1);
        assert_eq!(ctl.saved_lessons()[0].steps.len(), 2);
    }

    #[test]
    fn test_save_blank_name_is_noop() {
        let mut ctl = controller();
        ctl.create_blank().unwrap();
        assert!(ctl.save("   ").unwrap().is_none());
        assert!(ctl.save("").unwrap().is_none());
        assert!(ctl.saved_lessons().is_empty());
        assert_eq!(ctl.working().id, None);
    }

    #[test]
    fn test_untitled_lesson_is_not_saved() {
        let mut ctl = controller();
        ctl.restore().unwrap();
        assert!(ctl.save(UNTITLED_LESSON_NAME).unwrap().is_none());
        assert!(ctl.saved_lessons().is_empty());
        assert!(ctl.repository.list_all().is_empty());
        assert_eq!(ctl.repository.active_id().unwrap(), None);
        assert_eq!(ctl.working().id, None);
    }

    #[test]
    fn test_editing_untitled_lesson_seeds_a_slide() {
        let mut ctl = controller();
        ctl.restore().unwrap();
        assert!(ctl.ensure_editable());
        assert!(!ctl.ensure_editable());

        let saved = ctl.save(UNTITLED_LESSON_NAME).unwrap().unwrap();
        assert_eq!(saved.steps.len(), 1);
        assert_eq!(ctl.saved_lessons().len(), 1);
        assert!(ctl.start_session().is_some());
    }

    #[test]
    fn test_working_edits_are_not_live_written() {
        let mut ctl = controller();
        ctl.create_blank().unwrap();
        let saved = ctl.save("Drill").unwrap().unwrap();
        ctl.update_slide_text(0, "Unsaved change");

        let stored = ctl.repository.find_by_id(&saved.id).unwrap();
        assert_ne!(stored.steps[0].text, "Unsaved change");
    }

    #[test]
    fn test_load_by_id() {
        let lessons = [
            saved_lesson("a", "First", &["one"]),
            saved_lesson("b", "Second", &["two", "three"]),
        ];
        let mut ctl = controller_over(store_with(&lessons, Some("a")));
        ctl.restore().unwrap();

        assert_eq!(ctl.load_by_id("b").unwrap().as_deref(), Some("Second"));
        assert_eq!(ctl.working().steps.len(), 2);
        assert_eq!(ctl.repository.active_id().unwrap().as_deref(), Some("b"));

        assert_eq!(ctl.load_by_id("missing").unwrap(), None);
        assert!(ctl.is_active("b"));
    }

    #[test]
    fn test_delete_active_lesson_resets_working() {
        let lessons = [
            saved_lesson("a", "First", &["one"]),
            saved_lesson("b", "Second", &["two"]),
        ];
        let mut ctl = controller_over(store_with(&lessons, Some("a")));
        ctl.restore().unwrap();

        ctl.delete_saved("a").unwrap();
        assert_eq!(ctl.saved_lessons().len(), 1);
        assert_eq!(ctl.working().id, None);
        assert_eq!(ctl.working().name, UNTITLED_LESSON_NAME);
        assert!(ctl.working().steps.is_empty());
        assert_eq!(ctl.repository.active_id().unwrap(), None);
    }

    #[test]
    fn test_delete_other_lesson_keeps_working() {
        let lessons = [
            saved_lesson("a", "First", &["one"]),
            saved_lesson("b", "Second", &["two"]),
        ];
        let mut ctl = controller_over(store_with(&lessons, Some("a")));
        ctl.restore().unwrap();

        ctl.delete_saved("b").unwrap();
        assert!(ctl.is_active("a"));
        assert_eq!(ctl.repository.active_id().unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_import_merges_and_refreshes() {
        let lessons = [saved_lesson("a", "First", &["one"])];
        let mut ctl = controller_over(store_with(&lessons, None));
        ctl.restore().unwrap();

        let blob = serde_json::to_string(&[
            saved_lesson("a", "Duplicate", &["x"]),
            saved_lesson("c", "Imported", &["y"]),
        ])
        .unwrap();
        assert_eq!(ctl.import(&blob, TransferFormat::Json).unwrap(), 1);
        assert_eq!(ctl.saved_lessons().len(), 2);
        assert_eq!(ctl.saved_lessons()[0].name, "First");

        assert_eq!(ctl.import(&blob, TransferFormat::Json).unwrap(), 0);
        assert_eq!(ctl.saved_lessons().len(), 2);
    }

    #[test]
    fn test_import_failure_leaves_collection() {
        let lessons = [saved_lesson("a", "First", &["one"])];
        let mut ctl = controller_over(store_with(&lessons, None));
        ctl.restore().unwrap();

        let err = ctl.import(r#"{"not": "a list"}"#, TransferFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Expected array"));
        assert_eq!(ctl.repository.list_all(), lessons.to_vec());
    }

    #[test]
    fn test_export_uses_saved_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let mut ctl = controller();
        assert!(ctl.export_to(&path).is_err());

        ctl.create_blank().unwrap();
        ctl.save("Drill").unwrap();
        assert_eq!(ctl.export_to(&path).unwrap(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_start_session_snapshots_working_lesson() {
        let mut ctl = controller();
        ctl.create_blank().unwrap();
        ctl.update_slide_text(0, "I am");
        ctl.add_slide();
        ctl.update_slide_text(1, "I am");

        let session = ctl.start_session().unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.word_stock(), ["I am"]);
    }
}
