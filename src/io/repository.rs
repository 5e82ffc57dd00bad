// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved lesson collection and the active lesson pointer.
//!
//! Every operation is a read-modify-write round trip through the store.
//! The collection logic itself lives in pure functions that take the
//! current collection and return the next one.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::store::KeyValueStore;
use crate::models::lesson::Lesson;

/// Store key of the serialized lesson collection.
pub const LESSONS_KEY: &str = "reflex_prompter_multi_lessons";

/// Store key of the active lesson id.
pub const ACTIVE_LESSON_KEY: &str = "reflex_current_lesson_id";

/// Replace the lesson with the same id in place, or append it.
pub fn upsert_into(collection: &[Lesson], lesson: Lesson) -> Vec<Lesson> {
    let mut next = collection.to_vec();
    match next.iter().position(|l| l.id == lesson.id) {
        Some(index) => next[index] = lesson,
        None => next.push(lesson),
    }
    next
}

/// The collection without the lesson identified by `id`.
pub fn without(collection: &[Lesson], id: &str) -> Vec<Lesson> {
    collection.iter().filter(|l| l.id != id).cloned().collect()
}

/// CRUD over the saved lessons.
pub struct LessonRepository {
    store: Box<dyn KeyValueStore>,
}

impl LessonRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the collection, failing if the stored value does not parse.
    pub fn try_list_all(&self) -> Result<Vec<Lesson>> {
        match self.store.read(LESSONS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).context("Stored lessons are malformed"),
            None => Ok(Vec::new()),
        }
    }

    /// Read the collection. Unreadable data counts as no lessons.
    pub fn list_all(&self) -> Vec<Lesson> {
        self.try_list_all().unwrap_or_else(|e| {
            log::warn!("Treating saved lessons as empty: {:#}", e);
            Vec::new()
        })
    }

    /// Move an unparsable stored collection aside under `<key>.corrupt`.
    ///
    /// Returns `true` if something was moved. Nothing is touched when the
    /// collection is absent or readable.
    pub fn quarantine_malformed(&mut self) -> Result<bool> {
        let Some(raw) = self.store.read(LESSONS_KEY)? else {
            return Ok(false);
        };
        if serde_json::from_str::<Vec<Lesson>>(&raw).is_ok() {
            return Ok(false);
        }
        let backup_key = format!("{LESSONS_KEY}.corrupt");
        self.store.write(&backup_key, &raw)?;
        self.store.remove(LESSONS_KEY)?;
        log::warn!("Malformed saved lessons moved to {}", backup_key);
        Ok(true)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Lesson> {
        self.list_all().into_iter().find(|l| l.id == id)
    }

    /// Save `lesson`, stamping it with the current time.
    pub fn upsert(&mut self, lesson: Lesson) -> Result<Vec<Lesson>> {
        self.upsert_at(lesson, Utc::now())
    }

    pub fn upsert_at(&mut self, mut lesson: Lesson, now: DateTime<Utc>) -> Result<Vec<Lesson>> {
        lesson.updated_at = Some(now);
        let next = upsert_into(&self.list_all(), lesson);
        self.replace_all(&next)?;
        Ok(next)
    }

    /// Delete the lesson with `id`. Deleting an unknown id changes nothing.
    pub fn remove(&mut self, id: &str) -> Result<Vec<Lesson>> {
        let current = self.list_all();
        let next = without(&current, id);
        if next.len() != current.len() {
            self.replace_all(&next)?;
        }
        Ok(next)
    }

    /// Overwrite the whole collection.
    pub fn replace_all(&mut self, lessons: &[Lesson]) -> Result<()> {
        let raw = serde_json::to_string(lessons).context("Failed to serialize lessons")?;
        self.store.write(LESSONS_KEY, &raw)
    }

    /// Id of the lesson the working copy was last synchronized with.
    pub fn active_id(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .read(ACTIVE_LESSON_KEY)?
            .filter(|id| !id.trim().is_empty()))
    }

    /// Record or clear the active lesson id.
    pub fn set_active(&mut self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => self.store.write(ACTIVE_LESSON_KEY, id),
            None => self.store.remove(ACTIVE_LESSON_KEY),
        }
    }
}
