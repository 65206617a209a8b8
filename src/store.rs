// =============================================================================
// GUEST STORE MODULE
// =============================================================================
// Data access for guest profiles and preferences.
//
// The gateway only talks to the `GuestStore` trait. `SampleGuestStore` is the
// in-memory implementation used until a property-management system is wired
// in; it answers every room with the same sample guest.
// =============================================================================

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{GuestPreferences, GuestProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no guest registered for room {0}")]
    UnknownRoom(String),

    #[error("guest store unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to guest data, keyed by room identifier.
#[async_trait]
pub trait GuestStore: Send + Sync {
    async fn guest_profile(&self, room: &str) -> Result<GuestProfile, StoreError>;

    async fn preferences(&self, room: &str) -> Result<GuestPreferences, StoreError>;

    /// Record new preferences for the room's guest.
    ///
    /// Implementations are not required to make the change visible to later
    /// reads; see `SampleGuestStore`.
    async fn set_preferences(&self, room: &str, prefs: GuestPreferences) -> Result<(), StoreError>;
}

// -----------------------------------------------------------------------------
// SAMPLE STORE
// -----------------------------------------------------------------------------
/// Fixed sample data. Updates are accepted and dropped.
#[derive(Debug, Clone)]
pub struct SampleGuestStore {
    guest: GuestProfile,
}

impl SampleGuestStore {
    pub fn new() -> Self {
        Self {
            guest: GuestProfile {
                guest_name: "Mr. and Mrs. Johnson".to_string(),
                room_number: "Presidential Suite 401".to_string(),
                check_in_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_default(),
                preferences: GuestPreferences {
                    pillow_type: "Soft".to_string(),
                    mattress_type: "Firm".to_string(),
                    temperature: 22.into(),
                    lighting: "Warm".to_string(),
                },
            },
        }
    }
}

impl Default for SampleGuestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuestStore for SampleGuestStore {
    async fn guest_profile(&self, room: &str) -> Result<GuestProfile, StoreError> {
        // The room in the request path wins over the sample's own label
        let room_number = if room.is_empty() {
            self.guest.room_number.clone()
        } else {
            room.to_string()
        };

        Ok(GuestProfile {
            room_number,
            ..self.guest.clone()
        })
    }

    async fn preferences(&self, _room: &str) -> Result<GuestPreferences, StoreError> {
        Ok(self.guest.preferences.clone())
    }

    async fn set_preferences(&self, room: &str, prefs: GuestPreferences) -> Result<(), StoreError> {
        tracing::info!(
            room = %room,
            pillow_type = %prefs.pillow_type,
            mattress_type = %prefs.mattress_type,
            temperature = %prefs.temperature,
            "Preference update accepted (not persisted)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_echoes_room() {
        let store = SampleGuestStore::new();
        let profile = store.guest_profile("512").await.unwrap();

        assert_eq!(profile.room_number, "512");
        assert_eq!(profile.guest_name, "Mr. and Mrs. Johnson");
    }

    #[tokio::test]
    async fn test_empty_room_keeps_sample_label() {
        let store = SampleGuestStore::new();
        let profile = store.guest_profile("").await.unwrap();
        assert_eq!(profile.room_number, "Presidential Suite 401");
    }

    #[tokio::test]
    async fn test_set_preferences_is_not_durable() {
        let store = SampleGuestStore::new();
        let before = store.preferences("401").await.unwrap();

        let update = GuestPreferences {
            pillow_type: "Memory Foam".to_string(),
            mattress_type: "Soft".to_string(),
            temperature: serde_json::Number::from_f64(19.5).unwrap(),
            lighting: "Cool".to_string(),
        };
        store.set_preferences("401", update.clone()).await.unwrap();

        let after = store.preferences("401").await.unwrap();
        assert_eq!(after, before);
        assert_ne!(after, update);
    }
}
