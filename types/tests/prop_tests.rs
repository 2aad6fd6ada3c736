use proptest::prelude::*;

use aerosure_types::{AccountId, Amount, FlightCode, FlightKey, FlightStatus, Timestamp, AERO_UNIT};

proptest! {
    /// Amount: from_aero and to_aero are inverses for whole units.
    #[test]
    fn amount_unit_roundtrip(units in 0u128..1_000_000_000) {
        let amount = Amount::from_aero(units);
        prop_assert_eq!(amount.to_aero(), units);
    }

    /// Amount: raw roundtrip.
    #[test]
    fn amount_raw_roundtrip(raw in 0u128..u128::MAX / 2) {
        let amount = Amount::new(raw);
        prop_assert_eq!(amount.raw(), raw);
    }

    /// Amount: checked_add(a, b) == Some(a + b) when no overflow.
    #[test]
    fn amount_checked_add(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum, Some(Amount::new(a + b)));
    }

    /// Amount: checked_sub returns None when b > a.
    #[test]
    fn amount_checked_sub_underflow(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = Amount::new(a).checked_sub(Amount::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(Amount::new(a - b)));
        }
    }

    /// Amount: saturating_sub never panics and returns ZERO on underflow.
    #[test]
    fn amount_saturating_sub(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = Amount::new(a).saturating_sub(Amount::new(b));
        if b > a {
            prop_assert_eq!(result, Amount::ZERO);
        } else {
            prop_assert_eq!(result, Amount::new(a - b));
        }
    }

    /// Amount: the 3/2 payout scale stays within [premium, 2×premium].
    #[test]
    fn payout_scale_bounds(raw in 0u128..AERO_UNIT) {
        let premium = Amount::new(raw);
        let payout = premium.scale(3, 2);
        prop_assert!(payout >= premium);
        prop_assert!(payout.raw() <= raw * 2);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired_correct(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start.saturating_add(offset));
        prop_assert_eq!(t.has_expired(duration, now), offset >= duration);
    }

    /// FlightStatus: wire codes round-trip through from_code.
    #[test]
    fn status_code_roundtrip(idx in 0usize..6) {
        let status = FlightStatus::ALL[idx];
        prop_assert_eq!(FlightStatus::from_code(status.code()), Some(status));
    }

    /// FlightStatus: codes not a multiple of 10 (or above 50) are rejected.
    #[test]
    fn status_bad_code_rejected(code in 0u8..=255) {
        let expected_valid = code % 10 == 0 && code <= 50;
        prop_assert_eq!(FlightStatus::from_code(code).is_some(), expected_valid);
    }

    /// FlightKey: bincode serialization round-trips.
    #[test]
    fn flight_key_bincode_roundtrip(code in "[A-Z]{2}[0-9]{1,4}", secs in 0u64..u64::MAX) {
        let key = FlightKey::new(
            AccountId::new("aero_airline"),
            FlightCode::new(code),
            Timestamp::new(secs),
        );
        let encoded = bincode::serialize(&key).unwrap();
        let decoded: FlightKey = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, key);
    }

    /// FlightKey: byte encoding is injective over the departure timestamp.
    #[test]
    fn flight_key_bytes_distinct_departures(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let make = |secs| FlightKey::new(
            AccountId::new("aero_airline"),
            FlightCode::new("ND1309"),
            Timestamp::new(secs),
        );
        prop_assert_eq!(make(a).to_bytes() == make(b).to_bytes(), a == b);
    }
}
