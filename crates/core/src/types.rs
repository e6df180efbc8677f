/// Project and ticket identifiers are opaque strings (UUID v7 text).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity identifier.
///
/// UUID v7 is time-ordered, so ids minted later also sort later.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::now_v7().to_string()
}
