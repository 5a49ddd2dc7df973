use thiserror::Error;

/// Failures of the key-value store backing the persistent item list
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode stored value: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Conditions that abort a List Manager operation
///
/// The first three are expected user-input conditions: the action is abandoned
/// with no state change. `StorageUnavailable` is reported once, when the store
/// drops to in-memory operation.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Please add an item")]
    EmptyInput,

    #[error("Item already added")]
    DuplicateItem(String),

    #[error("Removal not confirmed")]
    Unconfirmed,

    #[error("Storage unavailable, changes will not be saved: {0}")]
    StorageUnavailable(#[from] StorageError),
}

impl ListError {
    /// Whether the user should see a notification for this error
    pub fn should_notify(&self) -> bool {
        !matches!(self, ListError::Unconfirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(ListError::EmptyInput.to_string(), "Please add an item");
        assert_eq!(
            ListError::DuplicateItem("Milk".to_string()).to_string(),
            "Item already added"
        );
        assert!(!ListError::Unconfirmed.should_notify());
        assert!(ListError::EmptyInput.should_notify());
    }

    #[test]
    fn test_quota_message_mentions_sizes() {
        let err = ListError::from(StorageError::QuotaExceeded {
            needed: 120,
            quota: 64,
        });
        let message = err.to_string();
        assert!(message.starts_with("Storage unavailable"));
        assert!(message.contains("120 bytes needed"));
    }
}
