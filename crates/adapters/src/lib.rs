// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tl-adapters: the external-interface traits (`FileStore`, `TileSource`,
//! `ComputeKernel`) and their reference implementations.

pub mod file_store;
pub mod kernel;
pub mod tile_source;

pub use file_store::{DiskFileStore, FileInfo, FileStore};
pub use kernel::{ComputeKernel, FallbackKernel, KernelOutput};
pub use tile_source::{GeneralDecoderSource, TileRegion, TileSource};
