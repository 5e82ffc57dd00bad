// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence of lessons and their import/export files.

pub mod repository;
pub mod store;
pub mod transfer;
