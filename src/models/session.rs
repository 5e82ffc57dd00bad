// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation session state.
//!
//! A session is built when a class starts and dropped when it ends. It owns
//! a snapshot of the slides, so editing the working lesson afterwards has
//! no effect on a running class.

use std::borrow::Cow;
use std::collections::HashSet;

use super::lesson::WorkingLesson;
use super::slide::Slide;
use crate::util::text;

/// Ephemeral run-time state of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationSession {
    slides: Vec<Slide>,
    cursor: usize,
    word_stock: Vec<String>,
}

impl PresentationSession {
    /// Start a class from the working lesson.
    ///
    /// Returns `None` when the lesson has no slides.
    pub fn start(lesson: &WorkingLesson) -> Option<Self> {
        if !lesson.can_start() {
            return None;
        }
        let slides = lesson.steps.clone();
        let word_stock = build_word_stock(&slides);
        Some(Self {
            slides,
            cursor: 0,
            word_stock,
        })
    }

    /// Move to the next slide. Stays on the last one.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.slides.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous slide. Stays on the first one.
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// The slide under the cursor, or the empty fallback.
    pub fn current_slide(&self) -> Cow<'_, Slide> {
        match self.slides.get(self.cursor) {
            Some(slide) => Cow::Borrowed(slide),
            None => Cow::Owned(Slide::empty_fallback()),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.slides.len()
    }

    /// Fraction of the class shown so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.slides.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f32 / self.slides.len() as f32
    }

    pub fn word_stock(&self) -> &[String] {
        &self.word_stock
    }

    /// End the class. The session is consumed and nothing of it remains.
    pub fn end(self) {
        log::info!(
            "Class ended on slide {} of {}",
            self.cursor + 1,
            self.slides.len()
        );
    }
}

/// Unique, trimmed, non-blank slide texts in order of first appearance.
pub fn build_word_stock(slides: &[Slide]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut stock = Vec::new();
    for slide in slides {
        if let Some(phrase) = text::non_blank(&slide.text) {
            if seen.insert(phrase) {
                stock.push(phrase.to_string());
            }
        }
    }
    stock
}
