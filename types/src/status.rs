//! Flight status codes.
//!
//! The wire codes (multiples of 10) are the values oracle reporters submit
//! and the relay exposes over HTTP. `LateAirline` is the single
//! payout-eligible status: only a delay attributed to the airline itself
//! entitles insured passengers to crediting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved delay status of a flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    /// No resolution has completed for this flight.
    Unknown,
    /// Departed on time.
    OnTime,
    /// Late, airline's fault. The only payout-eligible status.
    LateAirline,
    /// Late due to weather.
    LateWeather,
    /// Late due to a technical issue.
    LateTechnical,
    /// Late for any other reason.
    LateOther,
}

impl FlightStatus {
    /// All statuses a reporter may legitimately submit.
    pub const ALL: [FlightStatus; 6] = [
        FlightStatus::Unknown,
        FlightStatus::OnTime,
        FlightStatus::LateAirline,
        FlightStatus::LateWeather,
        FlightStatus::LateTechnical,
        FlightStatus::LateOther,
    ];

    /// The numeric wire code for this status.
    pub fn code(&self) -> u8 {
        match self {
            FlightStatus::Unknown => 0,
            FlightStatus::OnTime => 10,
            FlightStatus::LateAirline => 20,
            FlightStatus::LateWeather => 30,
            FlightStatus::LateTechnical => 40,
            FlightStatus::LateOther => 50,
        }
    }

    /// Parse a wire code. Returns `None` for codes outside the protocol.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FlightStatus::Unknown),
            10 => Some(FlightStatus::OnTime),
            20 => Some(FlightStatus::LateAirline),
            30 => Some(FlightStatus::LateWeather),
            40 => Some(FlightStatus::LateTechnical),
            50 => Some(FlightStatus::LateOther),
            _ => None,
        }
    }

    /// Human-readable label, as shown by the relay UI boundary.
    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Unknown => "Unknown",
            FlightStatus::OnTime => "On Time",
            FlightStatus::LateAirline => "Late Airline",
            FlightStatus::LateWeather => "Late Weather",
            FlightStatus::LateTechnical => "Late Technical Issue",
            FlightStatus::LateOther => "Other",
        }
    }

    /// Whether this status entitles insured passengers to a payout.
    pub fn is_payout_eligible(&self) -> bool {
        matches!(self, FlightStatus::LateAirline)
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
