// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Lesson, slide and presentation data model.

pub mod lesson;
pub mod session;
pub mod slide;
