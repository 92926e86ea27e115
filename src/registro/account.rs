use chrono::{DateTime, Utc};

/// A persisted account row.
///
/// Created exactly once by registration, never updated. The `email` is the
/// natural uniqueness key and is stored exactly as the client sent it, no
/// case folding.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password_hash() {
        let account = Account {
            id: 1,
            email: "test@example.com".to_string(),
            password_hash: "aa11:bb22".to_string(),
            created_at: Utc::now(),
        };

        let rendered = format!("{account:?}");
        assert!(rendered.contains("test@example.com"));
        assert!(!rendered.contains("aa11:bb22"));
    }
}
