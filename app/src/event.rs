//! Events emitted by the application facade for subscribers.
//!
//! The oracle relay listens for `OracleRequestOpened` to fan report
//! submissions out, and for `FlightStatusFinalized` to stop.

use aerosure_types::{AccountId, Amount, FlightKey, FlightStatus};

/// Pool-level events observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// An airline became a registered member.
    AirlineRegistered { airline: AccountId },
    /// An airline paid its admission fee.
    AirlineFunded { airline: AccountId, fee: Amount },
    /// A flight was registered by its airline.
    FlightRegistered { flight: FlightKey },
    /// A passenger bought a policy.
    InsurancePurchased {
        flight: FlightKey,
        passenger: AccountId,
        premium: Amount,
    },
    /// A policy was credited out of the reserve.
    InsuranceCredited {
        flight: FlightKey,
        passenger: AccountId,
        payout: Amount,
    },
    /// A resolution request opened; reporters holding `index` should respond.
    OracleRequestOpened { flight: FlightKey, index: u8 },
    /// A report was recorded without completing the quorum.
    OracleReportRecorded {
        flight: FlightKey,
        status: FlightStatus,
        reports: usize,
    },
    /// Quorum reached; the flight's status is now finalized.
    FlightStatusFinalized {
        flight: FlightKey,
        status: FlightStatus,
    },
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting call; keep handlers fast to
/// avoid stalling the pool's operations.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&AppEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&AppEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &AppEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn airline() -> AccountId {
        AccountId::new("aero_airline")
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&AppEvent::AirlineRegistered { airline: airline() });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&AppEvent::AirlineRegistered { airline: airline() }); // should not panic
    }

    #[test]
    fn listener_sees_the_event_payload() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let s = Arc::clone(&seen);
        bus.subscribe(Box::new(move |event| {
            if let AppEvent::OracleRequestOpened { index, .. } = event {
                s.store(*index as usize + 1, Ordering::SeqCst);
            }
        }));

        let flight = aerosure_types::FlightKey::new(
            airline(),
            aerosure_types::FlightCode::new("ND1309"),
            aerosure_types::Timestamp::new(1000),
        );
        bus.emit(&AppEvent::OracleRequestOpened { flight, index: 7 });

        assert_eq!(seen.load(Ordering::SeqCst), 8);
    }
}
