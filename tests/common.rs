// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Builds heart rate samples on a one-second clock and writes session files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::cast_possible_wrap
)]
//! Shared test utilities for `heartload`

use chrono::{DateTime, Duration, TimeZone, Utc};
use heartload_core::models::HeartRateSample;
use heartload_intelligence::HeartRateSeries;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed session start used by every fixture
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
}

/// `t0 + seconds`
pub fn at(seconds: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(seconds)
}

/// Samples at explicit second offsets from `t0`
pub fn samples_at(points: &[(i64, f64)]) -> Vec<HeartRateSample> {
    points
        .iter()
        .map(|&(offset, bpm)| HeartRateSample::new(at(offset), bpm))
        .collect()
}

/// Series of `values` one second apart starting at `t0`
pub fn contiguous_series(values: &[f64]) -> HeartRateSeries {
    let points: Vec<(i64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as i64, *v))
        .collect();
    HeartRateSeries::new(&samples_at(&points)).unwrap()
}

/// Series with samples at explicit second offsets
pub fn series_at(points: &[(i64, f64)]) -> HeartRateSeries {
    HeartRateSeries::new(&samples_at(points)).unwrap()
}

/// Write a file into `dir` and return its path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// CSV body with relative second offsets
pub fn relative_csv(points: &[(i64, f64)]) -> String {
    let mut body = String::from("time,heartRate\n");
    for (offset, bpm) in points {
        body.push_str(&format!("{offset},{bpm}\n"));
    }
    body
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Seconds between the Unix epoch and the FIT epoch (1989-12-31T00:00:00Z)
const FIT_EPOCH_OFFSET: i64 = 631_065_600;

const FIT_CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// FIT global message numbers used by fixtures
pub mod fit_mesg {
    pub const FILE_ID: u16 = 0;
    pub const SESSION: u16 = 18;
    pub const RECORD: u16 = 20;
}

/// FIT base types used by fixtures
pub mod fit_base {
    pub const ENUM: u8 = 0x00;
    pub const UINT8: u8 = 0x02;
    pub const UINT32: u8 = 0x86;
}

fn fit_crc(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0_u16, |mut crc, &byte| {
        for nibble in [byte & 0x0F, byte >> 4] {
            let tmp = FIT_CRC_TABLE[usize::from(crc & 0x0F)];
            crc = ((crc >> 4) & 0x0FFF) ^ tmp ^ FIT_CRC_TABLE[usize::from(nibble)];
        }
        crc
    })
}

/// FIT timestamp for `t0 + seconds`, little endian
pub fn fit_time(seconds: i64) -> [u8; 4] {
    ((t0().timestamp() + seconds - FIT_EPOCH_OFFSET) as u32).to_le_bytes()
}

/// Minimal little-endian FIT file writer for reader fixtures
#[derive(Default)]
pub struct FitFixture {
    records: Vec<u8>,
}

impl FitFixture {
    /// Definition message: `(field number, size, base type)` per field
    pub fn define(mut self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.records.extend([0x40 | local, 0, 0]);
        self.records.extend(global.to_le_bytes());
        self.records.push(fields.len() as u8);
        for &(number, size, base) in fields {
            self.records.extend([number, size, base]);
        }
        self
    }

    /// Data message for a previously defined local type
    pub fn data(mut self, local: u8, payload: &[u8]) -> Self {
        self.records.push(local);
        self.records.extend_from_slice(payload);
        self
    }

    /// Record message with a timestamp and heart rate
    pub fn heart_rate(self, local: u8, seconds: i64, bpm: u8) -> Self {
        let mut payload = fit_time(seconds).to_vec();
        payload.push(bpm);
        self.data(local, &payload)
    }

    /// Header, messages and trailing CRC
    pub fn build(self) -> Vec<u8> {
        let mut bytes = vec![14, 0x10];
        bytes.extend(2132_u16.to_le_bytes());
        bytes.extend((self.records.len() as u32).to_le_bytes());
        bytes.extend(b".FIT");
        let header_crc = fit_crc(&bytes);
        bytes.extend(header_crc.to_le_bytes());
        bytes.extend(&self.records);
        let crc = fit_crc(&bytes);
        bytes.extend(crc.to_le_bytes());
        bytes
    }
}

/// Running session starting at `t0` with heart rates at the given second offsets
pub fn fit_running_session(points: &[(i64, u8)]) -> Vec<u8> {
    let mut fixture = FitFixture::default()
        .define(
            0,
            fit_mesg::FILE_ID,
            &[(0, 1, fit_base::ENUM), (4, 4, fit_base::UINT32)],
        )
        .data(0, &[&[4][..], &fit_time(0)[..]].concat())
        .define(
            1,
            fit_mesg::RECORD,
            &[(253, 4, fit_base::UINT32), (3, 1, fit_base::UINT8)],
        );
    for &(seconds, bpm) in points {
        fixture = fixture.heart_rate(1, seconds, bpm);
    }
    fixture
        .define(2, fit_mesg::SESSION, &[(5, 1, fit_base::ENUM)])
        .data(2, &[1])
        .build()
}
