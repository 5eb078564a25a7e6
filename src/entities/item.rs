use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether an item is tracked as a discrete part or an assembled unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum PartOrUnit {
    #[sea_orm(string_value = "Part")]
    Part,
    #[sea_orm(string_value = "Unit")]
    Unit,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub manufacturer: String,
    pub model: String,
    pub part_or_unit: PartOrUnit,
    pub part_number: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit_price: Decimal,
    pub last_modified_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// An item is low in stock when its quantity has fallen to or below the
    /// configured minimum, boundary equality included.
    pub fn low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    pub fn model_part_num(&self) -> String {
        format!("{} {}", self.model, self.part_number)
    }

    /// Display string: manufacturer and model, plus the part number for parts.
    pub fn display_name(&self) -> String {
        let mut s = format!("{}, {}", self.manufacturer, self.model);
        if self.part_or_unit == PartOrUnit::Part {
            s.push(' ');
            s.push_str(&self.part_number);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn item(quantity: i32, min_quantity: i32) -> Model {
        Model {
            id: Uuid::new_v4(),
            manufacturer: "HP".into(),
            model: "LaserJet".into(),
            part_or_unit: PartOrUnit::Part,
            part_number: "C4127X".into(),
            description: String::new(),
            location: "A1".into(),
            quantity,
            min_quantity,
            unit_price: dec!(10.00),
            last_modified_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn low_stock_includes_boundary_equality() {
        assert!(item(0, 0).low_stock());
        assert!(item(5, 5).low_stock());
        assert!(item(4, 5).low_stock());
        assert!(!item(6, 5).low_stock());
    }

    #[test]
    fn display_name_appends_part_number_for_parts_only() {
        let part = item(1, 0);
        assert_eq!(part.display_name(), "HP, LaserJet C4127X");

        let mut unit = item(1, 0);
        unit.part_or_unit = PartOrUnit::Unit;
        assert_eq!(unit.display_name(), "HP, LaserJet");
    }
}
