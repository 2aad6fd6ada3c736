//! Resolution request state machine.
//!
//! One request tracks one flight's pending status determination. Reports
//! accumulate in per-status buckets; the first bucket to reach the quorum
//! finalizes the request and every other bucket is discarded. Finalized is
//! terminal for the cycle — late reports are rejected, never re-counted.

use std::collections::{HashMap, HashSet};

use aerosure_types::{AccountId, FlightKey, FlightStatus, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Lifecycle state of a resolution request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    /// Accepting reports at the assigned index.
    Open,
    /// Quorum reached; the winning status is recorded. Terminal.
    Finalized,
}

/// What recording one report did to the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Report accepted; the bucket for this status now holds `reports`.
    Recorded { status: FlightStatus, reports: usize },
    /// This report completed the quorum; the request is now finalized.
    Finalized { status: FlightStatus },
}

/// A single flight's open-to-finalized resolution lifecycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub key: FlightKey,
    /// The one index reporters must hold to respond to this request.
    pub index: u8,
    pub state: RequestState,
    pub opened_at: Timestamp,
    /// Reporter identities grouped by the status they reported.
    reports: HashMap<FlightStatus, HashSet<AccountId>>,
    /// The winning status once finalized.
    winner: Option<FlightStatus>,
}

impl ResolutionRequest {
    pub fn open(key: FlightKey, index: u8, now: Timestamp) -> Self {
        Self {
            key,
            index,
            state: RequestState::Open,
            opened_at: now,
            reports: HashMap::new(),
            winner: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == RequestState::Open
    }

    pub fn winner(&self) -> Option<FlightStatus> {
        self.winner
    }

    /// Number of reports currently in the bucket for `status`.
    pub fn reports_for(&self, status: FlightStatus) -> usize {
        self.reports.get(&status).map_or(0, |s| s.len())
    }

    /// Whether `reporter` has already contributed to this request, in any
    /// status bucket.
    pub fn has_reported(&self, reporter: &AccountId) -> bool {
        self.reports.values().any(|set| set.contains(reporter))
    }

    /// Record one accepted report.
    ///
    /// The caller has already verified the reporter's index against this
    /// request. A reporter contributes at most once per request; the bucket
    /// that reaches `quorum` first wins and the request finalizes
    /// immediately, discarding all other buckets.
    pub fn record(
        &mut self,
        reporter: AccountId,
        status: FlightStatus,
        quorum: usize,
    ) -> Result<ReportOutcome, OracleError> {
        if self.state == RequestState::Finalized {
            return Err(OracleError::AlreadyFinalized);
        }
        if self.has_reported(&reporter) {
            return Err(OracleError::DuplicateReport(reporter.to_string()));
        }

        let bucket = self.reports.entry(status).or_default();
        bucket.insert(reporter);
        let reports = bucket.len();

        if reports >= quorum {
            self.state = RequestState::Finalized;
            self.winner = Some(status);
            return Ok(ReportOutcome::Finalized { status });
        }
        Ok(ReportOutcome::Recorded { status, reports })
    }
}
