//! Coordinator — owns reporters and at most one resolution request per key.

use std::collections::HashMap;

use aerosure_types::{AccountId, Amount, FlightKey, FlightStatus, PoolParams, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::indexing;
use crate::reporter::{OracleReporter, ReporterRegistry};
use crate::request::{ReportOutcome, ResolutionRequest};

/// What a submission did, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The report was recorded; quorum not yet reached for its status.
    Recorded { status: FlightStatus, reports: usize },
    /// The report completed the quorum. The caller must write `status` to
    /// the flight record — the coordinator itself never touches flights.
    Finalized { status: FlightStatus },
}

/// The oracle consensus coordinator.
///
/// Holds the reporter registry and the per-key resolution requests. All
/// submissions are validated against current committed state; serialized
/// commit order (`&mut self`) decides which report completes a quorum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleCoordinator {
    reporters: ReporterRegistry,
    requests: HashMap<FlightKey, ResolutionRequest>,
}

impl OracleCoordinator {
    /// Create a coordinator whose index assignments derive from `seed`.
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            reporters: ReporterRegistry::new(seed),
            requests: HashMap::new(),
        }
    }

    /// Register a reporter (fee-gated). See [`ReporterRegistry::register`].
    pub fn register_reporter(
        &mut self,
        identity: AccountId,
        value: Amount,
        params: &PoolParams,
    ) -> Result<&OracleReporter, OracleError> {
        self.reporters.register(identity, value, params)
    }

    /// A reporter's assigned indices.
    pub fn reporter_indexes(&self, identity: &AccountId) -> Result<&[u8], OracleError> {
        self.reporters.indexes(identity)
    }

    pub fn reporters(&self) -> &ReporterRegistry {
        &self.reporters
    }

    /// The request currently tracked for a key, open or finalized.
    pub fn request(&self, key: &FlightKey) -> Option<&ResolutionRequest> {
        self.requests.get(key)
    }

    /// Open a resolution request for a flight key.
    ///
    /// Rejected while a request for the key is still open: re-signaling
    /// would trigger duplicate external dispatch. A finalized request from a
    /// previous cycle is replaced.
    pub fn open_request(
        &mut self,
        key: FlightKey,
        caller: &AccountId,
        now: Timestamp,
        params: &PoolParams,
    ) -> Result<&ResolutionRequest, OracleError> {
        if self.requests.get(&key).is_some_and(|r| r.is_open()) {
            return Err(OracleError::RequestAlreadyOpen);
        }

        let index = indexing::request_index(self.reporters.seed(), caller, &key, params);
        tracing::info!(flight = %key, index, by = %caller, "resolution request opened");

        let request = ResolutionRequest::open(key.clone(), index, now);
        Ok(self.requests.entry(key).and_modify(|r| *r = request.clone()).or_insert(request))
    }

    /// Submit one reporter's status observation for an open request.
    ///
    /// Validation order: the reporter must exist and hold `index`; a request
    /// must exist for the key; a finalized request rejects everything; the
    /// index must equal the request's assigned index; and each reporter may
    /// contribute only once per request.
    pub fn submit_response(
        &mut self,
        reporter: &AccountId,
        index: u8,
        key: &FlightKey,
        status: FlightStatus,
        params: &PoolParams,
    ) -> Result<SubmissionOutcome, OracleError> {
        let assigned = self.reporters.indexes(reporter)?;
        if !assigned.contains(&index) {
            return Err(OracleError::IndexMismatch(index));
        }

        let request = self
            .requests
            .get_mut(key)
            .ok_or(OracleError::NoOpenRequest)?;

        if !request.is_open() {
            return Err(OracleError::AlreadyFinalized);
        }
        if request.index != index {
            return Err(OracleError::IndexMismatch(index));
        }

        match request.record(reporter.clone(), status, params.oracle_quorum)? {
            ReportOutcome::Recorded { status, reports } => {
                tracing::debug!(
                    flight = %key,
                    reporter = %reporter,
                    %status,
                    reports,
                    "oracle report recorded"
                );
                Ok(SubmissionOutcome::Recorded { status, reports })
            }
            ReportOutcome::Finalized { status } => {
                tracing::info!(flight = %key, %status, "flight status finalized by quorum");
                Ok(SubmissionOutcome::Finalized { status })
            }
        }
    }
}
