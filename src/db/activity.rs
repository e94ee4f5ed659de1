//! Append-only audit log operations.

use super::AppState;
use chrono::Utc;
use uuid::Uuid;

use crate::activity::models::Activity;

impl AppState {
    /// Append an entry to the audit log. Entries are never mutated after
    /// this point.
    pub fn record_activity(
        &self,
        user_id: Uuid,
        user_name: &str,
        action: &str,
        target: &str,
        details: Option<String>,
    ) {
        let entry = Activity {
            id: Uuid::new_v4(),
            user_id,
            user_name: user_name.to_string(),
            action: action.to_string(),
            target: target.to_string(),
            timestamp: Utc::now(),
            details,
        };
        log::debug!("Activity: {} - {} ({})", entry.user_name, action, target);
        self.activities.write().push(entry);
    }

    /// Newest entries first, optionally capped.
    pub fn recent_activities(&self, limit: Option<usize>) -> Vec<Activity> {
        let activities = self.activities.read();
        let mut entries: Vec<Activity> = activities.iter().rev().cloned().collect();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }
}
