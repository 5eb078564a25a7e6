//! Change tracking for items.
//!
//! A snapshot captures the tracked fields of an item as last persisted;
//! diffing two snapshots yields the field-level changes a save produced.
//! Pure in-memory bookkeeping — nothing here touches the store.

use crate::entities::item::{self, PartOrUnit};
use rust_decimal::Decimal;

/// The nine audited fields of an item.
pub const TRACKED_FIELDS: [&str; 9] = [
    "manufacturer",
    "model",
    "part_or_unit",
    "part_number",
    "description",
    "location",
    "quantity",
    "min_quantity",
    "unit_price",
];

/// Point-in-time copy of an item's tracked fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub manufacturer: String,
    pub model: String,
    pub part_or_unit: PartOrUnit,
    pub part_number: String,
    pub description: String,
    pub location: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit_price: Decimal,
}

impl ItemSnapshot {
    pub fn capture(item: &item::Model) -> Self {
        Self {
            manufacturer: item.manufacturer.clone(),
            model: item.model.clone(),
            part_or_unit: item.part_or_unit,
            part_number: item.part_number.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            unit_price: item.unit_price,
        }
    }
}

/// One changed field, with the pre- and post-mutation values rendered as
/// display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

fn part_or_unit_str(v: PartOrUnit) -> &'static str {
    match v {
        PartOrUnit::Part => "Part",
        PartOrUnit::Unit => "Unit",
    }
}

/// Computes the tracked-field diff between two snapshots. Each changed
/// field appears exactly once, in declaration order; the old value comes
/// from `old`, the new from `new`.
pub fn diff(old: &ItemSnapshot, new: &ItemSnapshot) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.manufacturer != new.manufacturer {
        changes.push(FieldChange {
            field: "manufacturer",
            old: old.manufacturer.clone(),
            new: new.manufacturer.clone(),
        });
    }
    if old.model != new.model {
        changes.push(FieldChange {
            field: "model",
            old: old.model.clone(),
            new: new.model.clone(),
        });
    }
    if old.part_or_unit != new.part_or_unit {
        changes.push(FieldChange {
            field: "part_or_unit",
            old: part_or_unit_str(old.part_or_unit).to_string(),
            new: part_or_unit_str(new.part_or_unit).to_string(),
        });
    }
    if old.part_number != new.part_number {
        changes.push(FieldChange {
            field: "part_number",
            old: old.part_number.clone(),
            new: new.part_number.clone(),
        });
    }
    if old.description != new.description {
        changes.push(FieldChange {
            field: "description",
            old: old.description.clone(),
            new: new.description.clone(),
        });
    }
    if old.location != new.location {
        changes.push(FieldChange {
            field: "location",
            old: old.location.clone(),
            new: new.location.clone(),
        });
    }
    if old.quantity != new.quantity {
        changes.push(FieldChange {
            field: "quantity",
            old: old.quantity.to_string(),
            new: new.quantity.to_string(),
        });
    }
    if old.min_quantity != new.min_quantity {
        changes.push(FieldChange {
            field: "min_quantity",
            old: old.min_quantity.to_string(),
            new: new.min_quantity.to_string(),
        });
    }
    if old.unit_price != new.unit_price {
        // Prices render at fixed two decimal places; backends that store
        // decimals as floats drop trailing zeros otherwise.
        changes.push(FieldChange {
            field: "unit_price",
            old: format!("{:.2}", old.unit_price),
            new: format!("{:.2}", new.unit_price),
        });
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> ItemSnapshot {
        ItemSnapshot {
            manufacturer: "Test MFG1".into(),
            model: "Test Model1".into(),
            part_or_unit: PartOrUnit::Unit,
            part_number: String::new(),
            description: String::new(),
            location: "N/A".into(),
            quantity: 1,
            min_quantity: 0,
            unit_price: dec!(100.00),
        }
    }

    #[test]
    fn identical_snapshots_produce_empty_diff() {
        let a = snapshot();
        let b = a.clone();
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn quantity_change_is_reported_with_old_and_new_values() {
        let old = snapshot();
        let mut new = snapshot();
        new.quantity = 0;

        let changes = diff(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "quantity");
        assert_eq!(changes[0].old, "1");
        assert_eq!(changes[0].new, "0");
    }

    #[test]
    fn each_changed_field_appears_exactly_once() {
        let old = snapshot();
        let mut new = snapshot();
        new.manufacturer = "Other MFG".into();
        new.location = "B2".into();
        new.unit_price = dec!(99.95);

        let changes = diff(&old, &new);
        let fields: Vec<&str> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["manufacturer", "location", "unit_price"]);
    }

    #[test]
    fn decimal_rendering_keeps_two_fraction_digits() {
        let old = snapshot();
        let mut new = snapshot();
        new.unit_price = dec!(0.01);

        let changes = diff(&old, &new);
        assert_eq!(changes[0].old, "100.00");
        assert_eq!(changes[0].new, "0.01");
    }

    #[test]
    fn diff_is_idempotent_after_recapture() {
        // Simulates a save followed by another save with no edits: the
        // baseline is recaptured from the saved state, so the second diff
        // is empty.
        let old = snapshot();
        let mut edited = snapshot();
        edited.quantity = 5;
        assert_eq!(diff(&old, &edited).len(), 1);

        let recaptured = edited.clone();
        assert!(diff(&recaptured, &edited).is_empty());
    }
}
