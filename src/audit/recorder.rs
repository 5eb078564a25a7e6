//! History recording.
//!
//! Writes one immutable `item_histories` row per successful item mutation.
//! The recorder always runs on the caller's open transaction, so the
//! entity write and the history write commit or roll back together.

use crate::audit::tracker::FieldChange;
use crate::entities::item_history::{self, HistoryAction};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;

/// Renders an update diff the way history consumers expect:
/// `field: 'old' has been changed to 'new'`, comma-joined.
pub fn format_changes(diff: &[FieldChange]) -> String {
    diff.iter()
        .map(|c| format!("{}: '{}' has been changed to '{}'", c.field, c.old, c.new))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder;

impl HistoryRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Persists one history record. A failed insert here surfaces as a
    /// `ConsistencyError`, aborting the enclosing transaction so the
    /// triggering mutation never commits without its audit row.
    pub async fn record<C: ConnectionTrait>(
        &self,
        conn: &C,
        item_id: Uuid,
        action: HistoryAction,
        actor: Option<Uuid>,
        changes: Option<String>,
    ) -> Result<item_history::Model, ServiceError> {
        let record = item_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(item_id),
            action: Set(action),
            timestamp: Set(Utc::now()),
            actor: Set(actor),
            changes: Set(changes),
        };

        record.insert(conn).await.map_err(|e| {
            tracing::error!(%item_id, ?action, error = %e, "history write failed");
            ServiceError::ConsistencyError(format!(
                "history write for item {} failed: {}",
                item_id, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_changes_renders_the_documented_shape() {
        let diff = vec![FieldChange {
            field: "quantity",
            old: "1".into(),
            new: "0".into(),
        }];
        assert_eq!(
            format_changes(&diff),
            "quantity: '1' has been changed to '0'"
        );
    }

    #[test]
    fn format_changes_joins_with_comma_space() {
        let diff = vec![
            FieldChange {
                field: "location",
                old: "A1".into(),
                new: "B2".into(),
            },
            FieldChange {
                field: "unit_price",
                old: "10.00".into(),
                new: "12.50".into(),
            },
        ];
        assert_eq!(
            format_changes(&diff),
            "location: 'A1' has been changed to 'B2', unit_price: '10.00' has been changed to '12.50'"
        );
    }

    #[test]
    fn empty_diff_renders_empty_string() {
        assert_eq!(format_changes(&[]), "");
    }
}
