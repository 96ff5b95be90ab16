// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
// ABOUTME: Re-exports helper modules for heartload-cli
// ABOUTME: Provides text report formatting

pub mod display;
