use super::StorageError;

/// Abstract key-value persistence capability.
///
/// The store is the only writer per user, so the port contract is a
/// whole-value read and a whole-value replace — no incremental update.
/// Keys are derived from user identity via [`record_key`]; the port
/// never interprets them beyond uniqueness.
pub trait StoragePort: Send {
    /// Read the bytes stored under `key`, or `None` if nothing was ever
    /// saved there.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Durably replace the bytes stored under `key`.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Shared adapters work as ports too: a session store can own an
/// `Arc` handle while the host keeps another for inspection.
impl<T: StoragePort + Sync> StoragePort for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, bytes)
    }
}

/// Storage key for a user's record sequence. The user id is an opaque
/// identity string owned by the authentication collaborator.
pub fn record_key(user_id: &str) -> String {
    format!("records/{user_id}")
}
