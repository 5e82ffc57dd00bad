// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Slide data structures.
//!
//! A slide is one short phrase displayed full-screen during a class.
//! Slides are identified uniquely within their lesson and carry a type tag.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::util::text;

/// Maximum number of characters a slide's text may hold.
pub const MAX_SLIDE_TEXT: usize = 50;

/// Text given to slides appended in the editor.
pub const NEW_SLIDE_TEXT: &str = "New Slide";

/// Text given to the single slide of a blank lesson.
pub const FIRST_SLIDE_TEXT: &str = "Your First Slide";

/// Text shown when there is no slide to display.
pub const EMPTY_LESSON_TEXT: &str = "Lesson Empty";

/// Identifier of a slide within its lesson.
///
/// Older exports use numeric millisecond stamps; new slides get UUID strings.
/// Either form is kept as-is on load and save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideId {
    Numeric(Number),
    Text(String),
}

impl SlideId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        SlideId::Text(Uuid::new_v4().to_string())
    }
}

/// Type tag of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    #[default]
    Statement,
    Question,
    /// Tag written by another tool, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl SlideType {
    /// Types offered in the editor.
    pub const BUILTIN: [SlideType; 2] = [SlideType::Statement, SlideType::Question];

    pub fn label(&self) -> &str {
        match self {
            SlideType::Statement => "statement",
            SlideType::Question => "question",
            SlideType::Other(tag) => tag,
        }
    }
}

/// Missing, null, empty and non-string tags all mean "statement".
fn deserialize_slide_type<'de, D>(deserializer: D) -> Result<SlideType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) => match tag.as_str() {
            "statement" => SlideType::Statement,
            "question" => SlideType::Question,
            _ if tag.trim().is_empty() => SlideType::Statement,
            _ => SlideType::Other(tag),
        },
        _ => SlideType::Statement,
    })
}

/// Missing, null, empty or non-scalar ids are replaced by a fresh one.
fn deserialize_slide_id<'de, D>(deserializer: D) -> Result<SlideId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => SlideId::Numeric(n),
        Some(Value::String(s)) if !s.is_empty() => SlideId::Text(s),
        _ => SlideId::generate(),
    })
}

/// Numbers and booleans become their text; anything else is empty.
fn deserialize_slide_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// A single slide of a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default = "SlideId::generate", deserialize_with = "deserialize_slide_id")]
    pub id: SlideId,
    #[serde(default, deserialize_with = "deserialize_slide_text")]
    pub text: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_slide_type"
    )]
    pub slide_type: SlideType,
}

impl Slide {
    /// Create a statement slide with a fresh identifier.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: SlideId::generate(),
            text: text.into(),
            slide_type: SlideType::Statement,
        }
    }

    /// The slide a blank lesson starts with.
    pub fn placeholder() -> Self {
        Self::new(FIRST_SLIDE_TEXT)
    }

    /// The value displayed when a presentation has nothing to show.
    pub fn empty_fallback() -> Self {
        Self {
            id: SlideId::Numeric(Number::from(0u64)),
            text: EMPTY_LESSON_TEXT.to_string(),
            slide_type: SlideType::Statement,
        }
    }

    /// Whether `text` may be stored on a slide.
    pub fn accepts_text(text: &str) -> bool {
        text::within_limit(text, MAX_SLIDE_TEXT)
    }
}
