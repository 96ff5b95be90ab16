// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
// ABOUTME: Re-exports command modules for heartload-cli
// ABOUTME: Provides the single-session and directory analysis commands

pub mod analyze;
pub mod batch;
