// ABOUTME: Core types and constants for the heartload training load engine
// ABOUTME: Foundation crate with error handling, heart rate sample models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![deny(unsafe_code)]

//! # Heartload Core
//!
//! Foundation crate providing shared types and constants for heart rate
//! analysis. This crate is designed to change infrequently, so the engine and
//! the session readers can depend on it without pulling in each other.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological limits, time constants and environment keys
//! - **models**: Heart rate samples and athlete attributes

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`HeartRateSample`, `Sex`)
pub mod models;
