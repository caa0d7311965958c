use uuid::Uuid;

/// Fresh opaque identifier for a newly created record.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
