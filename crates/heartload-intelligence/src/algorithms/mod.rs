// ABOUTME: Training load scoring algorithms
// ABOUTME: Factor-based (exponential) and zone-based TRIMP models with built-in tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

/// TRIMP scoring model tables and selection
pub mod trimp;

pub use trimp::{
    Coefficients, FactorBased, FactorModel, ScoringModel, SexCoefficients, TrimpModel, ZoneBased,
    ZoneModel, BANISTER, EDWARDS, MODIFIED_EDWARDS, MORTON, STAGNO,
};
