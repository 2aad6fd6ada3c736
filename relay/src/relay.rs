//! Reporter pool and the supervised dispatch loop.

use std::sync::Arc;
use std::time::Duration;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use tokio::sync::{broadcast, RwLock};

use aerosure_app::{AppError, AppEvent, SuretyApp};
use aerosure_oracle::{OracleError, SubmissionOutcome};
use aerosure_types::{AccountId, Amount, FlightKey, FlightStatus};

use crate::error::RelayError;

type Blake2b256 = Blake2b<U32>;

/// Capacity of the event channel bridged from the pool's event bus.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Relay tuning.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Reporter identities the relay registers at bootstrap.
    pub reporter_count: usize,
    /// How long a resolution may run before the relay reports a liveness
    /// failure.
    pub quorum_deadline: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            reporter_count: 20,
            quorum_deadline: Duration::from_secs(30),
        }
    }
}

/// The off-chain relay: a pool of reporter identities plus the event
/// subscription it uses to follow resolutions it did not finalize itself.
pub struct OracleRelay {
    app: Arc<RwLock<SuretyApp>>,
    reporters: Vec<AccountId>,
    identity: AccountId,
    events: broadcast::Sender<AppEvent>,
    config: RelayConfig,
}

impl OracleRelay {
    /// Register `config.reporter_count` reporter identities against the pool
    /// and bridge the pool's event bus into a broadcast channel.
    ///
    /// `owner` funds the reporter accounts; registration fees flow back into
    /// the pool's reserve.
    pub async fn bootstrap(
        app: Arc<RwLock<SuretyApp>>,
        owner: &AccountId,
        config: RelayConfig,
    ) -> Result<Self, RelayError> {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let mut reporters = Vec::with_capacity(config.reporter_count);
        {
            let mut pool = app.write().await;
            let fee = pool.params().oracle_registration_fee;
            let stake = fee.checked_add(fee).unwrap_or(fee);
            for i in 0..config.reporter_count {
                let id = AccountId::new(format!("aero_relay_oracle_{i}"));
                pool.seed_account(id.clone(), stake, owner)
                    .map_err(|e| RelayError::App(e.to_string()))?;
                let indexes = pool
                    .register_oracle(&id, fee)
                    .map_err(|e| RelayError::App(e.to_string()))?;
                tracing::info!(reporter = %id, ?indexes, "relay reporter registered");
                reporters.push(id);
            }

            let forward = tx.clone();
            pool.subscribe(Box::new(move |event| {
                let _ = forward.send(event.clone());
            }));
        }

        Ok(Self {
            app,
            reporters,
            identity: AccountId::new("aero_relay"),
            events: tx,
            config,
        })
    }

    /// The relay's reporter identities.
    pub fn reporters(&self) -> &[AccountId] {
        &self.reporters
    }

    /// Subscribe to the bridged pool events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    /// Every registered reporter's index assignment, for `/oracles-index`.
    pub async fn index_map(&self) -> std::collections::HashMap<String, Vec<u8>> {
        self.app.read().await.oracle_index_map()
    }

    /// Status the relay's simulated carrier feed reports for a flight.
    /// Deterministic per key, never `Unknown`.
    pub fn observed_status(key: &FlightKey) -> FlightStatus {
        let mut hasher = Blake2b256::new();
        hasher.update(key.to_bytes());
        let digest = hasher.finalize();
        let pick = (digest[0] as usize % 5) + 1;
        FlightStatus::ALL[pick]
    }

    /// Drive one flight's status resolution to finalization.
    ///
    /// Opens the request (attaching to one already open), fans submissions
    /// out across the reporter pool, and returns the finalized status. Fails
    /// with [`RelayError::QuorumTimeout`] if the deadline passes first, or
    /// [`RelayError::QuorumNotReached`] once the pool is exhausted without a
    /// quorum — the liveness failure is reported, never looped on forever.
    pub async fn resolve_flight(&self, key: &FlightKey) -> Result<FlightStatus, RelayError> {
        let status = Self::observed_status(key);
        let mut events = self.events.subscribe();

        let index = {
            let mut pool = self.app.write().await;
            match pool.fetch_flight_status(key, &self.identity) {
                Ok(index) => index,
                Err(AppError::Oracle(OracleError::RequestAlreadyOpen)) => pool
                    .open_request_index(key)
                    .ok_or_else(|| RelayError::App("open request vanished".into()))?,
                Err(AppError::Registry(_)) => return Err(RelayError::FlightNotFound),
                Err(e) => return Err(RelayError::App(e.to_string())),
            }
        };
        tracing::info!(flight = %key, index, %status, "driving resolution");

        let deadline = self.config.quorum_deadline;
        match tokio::time::timeout(deadline, self.dispatch(key, index, status, &mut events)).await
        {
            Ok(result) => result,
            Err(_) => Err(RelayError::QuorumTimeout {
                flight: key.to_string(),
                deadline_secs: deadline.as_secs(),
            }),
        }
    }

    /// The supervising dispatch task: follows the pool's signals and drives
    /// one bounded cycle per opened request, whoever opened it.
    ///
    /// The subscription is taken before this returns, so a signal emitted
    /// between construction and the first poll is not lost. Racing another
    /// driver on the same key is safe — duplicate and post-finalization
    /// submissions are skippable, so concurrent dispatchers converge on the
    /// same outcome.
    pub fn supervise(self: Arc<Self>) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut signals = self.events.subscribe();
        async move {
            loop {
                match signals.recv().await {
                    Ok(AppEvent::OracleRequestOpened { flight, index }) => {
                        self.drive_cycle(&flight, index).await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "signal channel lagged; continuing");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    /// One supervised cycle under the quorum deadline. Liveness failures are
    /// logged and reported, never looped on.
    async fn drive_cycle(&self, key: &FlightKey, index: u8) {
        let status = Self::observed_status(key);
        let mut events = self.events.subscribe();
        let deadline = self.config.quorum_deadline;
        match tokio::time::timeout(deadline, self.dispatch(key, index, status, &mut events)).await
        {
            Ok(Ok(finalized)) => {
                tracing::info!(flight = %key, status = %finalized, "cycle finalized");
            }
            Ok(Err(e)) => {
                tracing::warn!(flight = %key, error = %e, "cycle failed");
            }
            Err(_) => {
                tracing::warn!(
                    flight = %key,
                    deadline_secs = deadline.as_secs(),
                    "cycle deadline passed without quorum"
                );
            }
        }
    }

    /// One bounded pass over the reporter pool. Each reporter submits at
    /// most once; a finalization observed on the event channel stops the
    /// loop, since every later submission would be rejected anyway.
    async fn dispatch(
        &self,
        key: &FlightKey,
        index: u8,
        status: FlightStatus,
        events: &mut broadcast::Receiver<AppEvent>,
    ) -> Result<FlightStatus, RelayError> {
        for id in &self.reporters {
            while let Ok(event) = events.try_recv() {
                if let AppEvent::FlightStatusFinalized { flight, status } = event {
                    if flight == *key {
                        tracing::info!(flight = %key, %status, "finalization observed — stopping dispatch");
                        return Ok(status);
                    }
                }
            }

            let holds_index = {
                let pool = self.app.read().await;
                pool.my_indexes(id)
                    .map(|indexes| indexes.contains(&index))
                    .map_err(|e| RelayError::App(e.to_string()))?
            };
            if !holds_index {
                tracing::debug!(reporter = %id, index, "index not held — skipping");
                continue;
            }

            let result = {
                let mut pool = self.app.write().await;
                pool.submit_oracle_response(id, index, key, status)
            };
            match result {
                Ok(SubmissionOutcome::Finalized { status }) => {
                    tracing::info!(flight = %key, %status, "quorum reached");
                    return Ok(status);
                }
                Ok(SubmissionOutcome::Recorded { reports, .. }) => {
                    tracing::debug!(reporter = %id, reports, "report recorded");
                }
                // Expected, skippable rejections: another relay's reporter
                // may have beaten this one, or the pool re-checked an index.
                Err(AppError::Oracle(OracleError::IndexMismatch(_)))
                | Err(AppError::Oracle(OracleError::DuplicateReport(_))) => continue,
                Err(AppError::Oracle(OracleError::AlreadyFinalized)) => {
                    let pool = self.app.read().await;
                    let finalized = pool
                        .get_flight(key)
                        .map(|f| f.status)
                        .ok_or(RelayError::FlightNotFound)?;
                    return Ok(finalized);
                }
                Err(e) => return Err(RelayError::App(e.to_string())),
            }
        }

        Err(RelayError::QuorumNotReached {
            flight: key.to_string(),
        })
    }
}
