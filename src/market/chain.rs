//! Multi-instrument analysis with per-instrument error isolation.
//!
//! This module provides the `OptionChain` struct for holding the latest
//! snapshot of many instruments and analysing them in one pass. A failure
//! on one instrument is logged and recorded; it never stops the others.

use super::analysis::{AnalysisConfig, InstrumentAnalysis, analyze_snapshot};
use super::snapshot::OrderBookSnapshot;
use crate::volatility::IVError;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::{error, info};

/// Outcome of analysing every instrument of a chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainReport {
    /// Successful analyses keyed by instrument name.
    pub analyses: BTreeMap<String, InstrumentAnalysis>,
    /// Failures keyed by instrument name.
    pub failures: BTreeMap<String, IVError>,
}

impl ChainReport {
    /// Number of instruments analysed successfully.
    pub fn success_count(&self) -> usize {
        self.analyses.len()
    }

    /// Number of instruments that failed.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when no instrument failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Latest order book snapshots of a set of option instruments.
#[derive(Debug, Clone, Default)]
pub struct OptionChain {
    /// Snapshots indexed by instrument name
    snapshots: HashMap<String, OrderBookSnapshot>,
    /// Settings used by `analyze`
    config: AnalysisConfig,
}

impl OptionChain {
    /// Create an empty chain with the given analysis settings.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            snapshots: HashMap::new(),
            config,
        }
    }

    /// The analysis settings.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Add or replace the snapshot of an instrument, returning the previous one.
    pub fn add_snapshot(&mut self, snapshot: OrderBookSnapshot) -> Option<OrderBookSnapshot> {
        let name = snapshot.instrument_name.clone();
        let previous = self.snapshots.insert(name.clone(), snapshot);
        if previous.is_none() {
            info!("Added snapshot for instrument: {}", name);
        }
        previous
    }

    /// Decode a `get_order_book` result and add it.
    ///
    /// # Errors
    /// `Deserialization` when the payload cannot be decoded.
    pub fn add_json(&mut self, data: &str) -> Result<(), IVError> {
        let snapshot = OrderBookSnapshot::from_json(data)?;
        self.add_snapshot(snapshot);
        Ok(())
    }

    /// Get the snapshot of an instrument.
    pub fn get_snapshot(&self, instrument: &str) -> Option<&OrderBookSnapshot> {
        self.snapshots.get(instrument)
    }

    /// Remove the snapshot of an instrument.
    pub fn remove_snapshot(&mut self, instrument: &str) -> Option<OrderBookSnapshot> {
        let result = self.snapshots.remove(instrument);
        if result.is_some() {
            info!("Removed snapshot for instrument: {}", instrument);
        }
        result
    }

    /// Check if a snapshot exists for an instrument.
    pub fn has_instrument(&self, instrument: &str) -> bool {
        self.snapshots.contains_key(instrument)
    }

    /// Sorted names of every instrument in the chain.
    pub fn instruments(&self) -> Vec<String> {
        let mut names: Vec<String> = self.snapshots.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of instruments in the chain.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when the chain holds no snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Analyse every instrument as of `now`.
    pub fn analyze(&self, now: DateTime<Utc>) -> ChainReport {
        let mut report = ChainReport::default();

        let mut entries: Vec<(&String, &OrderBookSnapshot)> = self.snapshots.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (name, snapshot) in entries {
            let name = name.clone();
            match analyze_snapshot(snapshot, now, &self.config) {
                Ok(analysis) => {
                    info!(
                        "{}: mark IV {:.4} via {} ({} iterations), delta {:.4}",
                        name,
                        analysis.mark_iv(),
                        analysis.mark.solution.method,
                        analysis.mark.solution.iterations_used,
                        analysis.greeks.delta
                    );
                    report.analyses.insert(name, analysis);
                }
                Err(e) => {
                    error!("Failed to analyse {}: {}", name, e);
                    report.failures.insert(name, e);
                }
            }
        }

        info!(
            "Chain analysed: {} succeeded, {} failed",
            report.success_count(),
            report.failure_count()
        );
        report
    }
}
