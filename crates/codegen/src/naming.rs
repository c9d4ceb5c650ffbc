//! Repository naming for published projects.

use chrono::{DateTime, Utc};

pub const REPO_NAME_PREFIX: &str = "generated-bot";

/// `generated-bot-<user_id>`, or `generated-bot-<unix millis>` when the sender is unknown.
pub fn repo_name_for(user_id: Option<i64>) -> String {
    repo_name_at(user_id, Utc::now())
}

/// Like [`repo_name_for`] with an explicit clock.
pub fn repo_name_at(user_id: Option<i64>, now: DateTime<Utc>) -> String {
    match user_id.filter(|id| *id > 0) {
        Some(id) => format!("{}-{}", REPO_NAME_PREFIX, id),
        None => format!("{}-{}", REPO_NAME_PREFIX, now.timestamp_millis()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_repo_name_uses_user_id() {
        assert_eq!(repo_name_for(Some(42)), "generated-bot-42");
    }

    #[test]
    fn test_repo_name_falls_back_to_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(repo_name_at(None, now), "generated-bot-1700000000123");
        // Adapters use 0 when the sender is unknown.
        assert_eq!(repo_name_at(Some(0), now), "generated-bot-1700000000123");
    }
}
