// =============================================================================
// ROOM ENVIRONMENT MODULE
// =============================================================================
// Simulated climate sensor feed. Every call draws a fresh reading; there is
// no hardware behind it yet.
// =============================================================================

use std::ops::Range;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::{AirQuality, RoomEnvironment};

// -----------------------------------------------------------------------------
// VALUE RANGES
// -----------------------------------------------------------------------------
// Half-open ranges, matching `gen_range`. The air-quality label is fixed at
// Excellent because the index never leaves the excellent band.

pub const TEMPERATURE_RANGE: Range<f64> = 20.0..26.0;
pub const HUMIDITY_RANGE: Range<u8> = 40..60;
pub const AIR_QUALITY_INDEX_RANGE: Range<u8> = 85..100;

/// Reading for `room` using the thread-local RNG.
///
/// `room` does not influence the values today.
pub fn synthesize(room: &str) -> RoomEnvironment {
    let reading = synthesize_with(&mut rand::thread_rng(), Utc::now());
    tracing::debug!(
        room = %room,
        temperature = reading.temperature,
        humidity = reading.humidity,
        "Synthesized room environment"
    );
    reading
}

/// Pure draw from `rng`, stamped with `now`.
pub fn synthesize_with<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> RoomEnvironment {
    // One decimal, floored, so the value never reaches the upper bound
    let temperature = (rng.gen_range(TEMPERATURE_RANGE) * 10.0).floor() / 10.0;

    RoomEnvironment {
        temperature,
        humidity: rng.gen_range(HUMIDITY_RANGE),
        air_quality: AirQuality::Excellent,
        air_quality_index: rng.gen_range(AIR_QUALITY_INDEX_RANGE),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_ten_thousand_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let now = Utc::now();

        for _ in 0..10_000 {
            let reading = synthesize_with(&mut rng, now);
            assert!(TEMPERATURE_RANGE.contains(&reading.temperature), "{}", reading.temperature);
            assert!(HUMIDITY_RANGE.contains(&reading.humidity));
            assert!(AIR_QUALITY_INDEX_RANGE.contains(&reading.air_quality_index));
            assert_eq!(reading.air_quality, AirQuality::Excellent);
        }
    }

    #[test]
    fn test_timestamp_is_now() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        assert_eq!(synthesize_with(&mut rng, now).last_updated, now);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(synthesize("401")).unwrap();
        assert_eq!(value["airQuality"], "Excellent");
        assert!(value["airQualityIndex"].is_u64());
        assert!(value["lastUpdated"].is_string());
    }
}
