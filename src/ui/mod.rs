// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the ReFlex application.

pub mod editor;
pub mod home;
pub mod stage;
pub mod status;
