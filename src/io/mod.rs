// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: folder listing, rasterization, export and watching.

pub mod export;
pub mod folder;
pub mod media;
pub mod serialization;
pub mod watcher;
