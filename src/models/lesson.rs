// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Lesson state management.
//!
//! A [`Lesson`] is the persisted form: always named, always identified.
//! A [`WorkingLesson`] is the copy open in the editor, which may not have
//! been saved yet. Edits on the working lesson validate before touching
//! anything, so a rejected edit leaves the lesson exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::slide::{Slide, SlideType, NEW_SLIDE_TEXT};

/// Name of the working lesson before anything has been loaded.
pub const UNTITLED_LESSON_NAME: &str = "Untitled Lesson";

/// Name given to a freshly created blank lesson.
pub const NEW_LESSON_NAME: &str = "New Unsaved Lesson";

/// A saved lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub name: String,
    pub steps: Vec<Slide>,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Unparsable timestamps are dropped instead of failing the whole lesson.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// Direction of a slide move in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The lesson currently open for editing or about to be presented.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingLesson {
    /// Identifier of the saved lesson this copy came from, if any.
    pub id: Option<String>,
    pub name: String,
    pub steps: Vec<Slide>,
}

impl Default for WorkingLesson {
    fn default() -> Self {
        Self::untitled()
    }
}

impl WorkingLesson {
    /// The state before any lesson has been loaded or created.
    pub fn untitled() -> Self {
        Self {
            id: None,
            name: UNTITLED_LESSON_NAME.to_string(),
            steps: Vec::new(),
        }
    }

    /// A new unsaved lesson with one placeholder slide.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: NEW_LESSON_NAME.to_string(),
            steps: vec![Slide::placeholder()],
        }
    }

    /// Copy a saved lesson into a working lesson.
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: Some(lesson.id.clone()),
            name: lesson.name.clone(),
            steps: lesson.steps.clone(),
        }
    }

    /// Whether a class can be started from this lesson.
    pub fn can_start(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Seed a placeholder slide into a lesson with none. Returns whether one was added.
    pub fn ensure_editable(&mut self) -> bool {
        if !self.steps.is_empty() {
            return false;
        }
        self.steps.push(Slide::placeholder());
        true
    }

    /// Append a default slide and return its index.
    pub fn add_slide(&mut self) -> usize {
        self.steps.push(Slide::new(NEW_SLIDE_TEXT));
        self.steps.len() - 1
    }

    /// Remove the slide at `index`.
    ///
    /// Deleting the only slide replaces it with a fresh placeholder, so a
    /// lesson that had slides never ends up with none.
    pub fn delete_slide(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        if self.steps.len() == 1 {
            self.steps[0] = Slide::placeholder();
        } else {
            self.steps.remove(index);
        }
        true
    }

    /// Swap the slide at `index` with its neighbour. No-op at either end.
    pub fn move_slide(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.steps.len() => index + 1,
            _ => return false,
        };
        if index >= self.steps.len() {
            return false;
        }
        self.steps.swap(index, target);
        true
    }

    /// Replace a slide's text, keeping its id and type.
    ///
    /// Text over the slide limit is rejected and nothing changes.
    pub fn update_slide_text(&mut self, index: usize, text: &str) -> bool {
        if !Slide::accepts_text(text) {
            return false;
        }
        match self.steps.get_mut(index) {
            Some(slide) => {
                slide.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Replace a slide's type tag, keeping its id and text.
    pub fn update_slide_type(&mut self, index: usize, slide_type: SlideType) -> bool {
        match self.steps.get_mut(index) {
            Some(slide) => {
                slide.slide_type = slide_type;
                true
            }
            None => false,
        }
    }

    /// Build the persistable form of this lesson.
    pub fn to_lesson(&self, id: String, name: &str, updated_at: DateTime<Utc>) -> Lesson {
        Lesson {
            id,
            name: name.to_string(),
            steps: self.steps.clone(),
            updated_at: Some(updated_at),
        }
    }
}
