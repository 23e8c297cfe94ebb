//! Pluggable detection-event sources.
//!
//! The ingestion pipeline only sees the [`EventSource`] trait, so a real
//! camera/detector feed can replace the synthetic generator without any
//! change downstream.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sitewatch_types::PpeFlags;

use crate::detection::NewDetection;
use crate::TIMESTAMP_FORMAT;

/// The fixed set of camera locations the reference deployment reports.
pub const CAMERA_LOCATIONS: [&str; 4] = ["Gate A", "Gate B", "Workshop", "Storage Area"];

/// Per-item presence probabilities for the synthetic feed. Tuned so
/// required-item violations happen often enough to exercise alerting.
const P_HELMET: f64 = 0.85;
const P_VEST: f64 = 0.90;
const P_GLOVES: f64 = 0.80;
const P_GOGGLES: f64 = 0.60;
const P_BOOTS: f64 = 0.75;
const P_MASK: f64 = 0.50;

/// Something that can produce the next detection event.
pub trait EventSource {
    /// Produces one detection event timestamped at `now`.
    fn next_event(&mut self, now: DateTime<Local>) -> NewDetection;
}

/// Synthesizes detection events with fixed Bernoulli presence rates,
/// uniform worker/location choice, and confidence uniform in [0.70, 0.99].
#[derive(Debug)]
pub struct SyntheticSource {
    worker_ids: Vec<i64>,
    rng: StdRng,
}

impl SyntheticSource {
    /// Creates a source drawing workers uniformly from `worker_ids`.
    ///
    /// Returns `None` when the worker list is empty — a source with no
    /// subjects cannot produce events.
    pub fn new(worker_ids: Vec<i64>) -> Option<Self> {
        Self::with_rng(worker_ids, StdRng::from_entropy())
    }

    /// Creates a deterministic source for tests.
    pub fn with_seed(worker_ids: Vec<i64>, seed: u64) -> Option<Self> {
        Self::with_rng(worker_ids, StdRng::seed_from_u64(seed))
    }

    fn with_rng(worker_ids: Vec<i64>, rng: StdRng) -> Option<Self> {
        if worker_ids.is_empty() {
            return None;
        }
        Some(Self { worker_ids, rng })
    }
}

impl EventSource for SyntheticSource {
    fn next_event(&mut self, now: DateTime<Local>) -> NewDetection {
        let worker_id = *self
            .worker_ids
            .choose(&mut self.rng)
            .expect("worker list is non-empty by construction");

        let flags = PpeFlags {
            helmet: self.rng.gen_bool(P_HELMET),
            vest: self.rng.gen_bool(P_VEST),
            gloves: self.rng.gen_bool(P_GLOVES),
            goggles: self.rng.gen_bool(P_GOGGLES),
            boots: self.rng.gen_bool(P_BOOTS),
            mask: self.rng.gen_bool(P_MASK),
        };

        // Two decimals, matching detector feed precision.
        let raw: f64 = self.rng.gen_range(0.70..=0.99);
        let confidence = (raw * 100.0).round() / 100.0;

        let camera_location = CAMERA_LOCATIONS
            .choose(&mut self.rng)
            .expect("location set is non-empty")
            .to_string();

        NewDetection {
            worker_id,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            flags,
            confidence,
            camera_location,
        }
    }
}
