use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Confirmed")]
    Confirmed,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "ContractSigned")]
    #[serde(rename = "Contract Signed")]
    ContractSigned,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

impl OrderStatus {
    /// Statuses reachable from `self` in a single step.
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Rejected, ContractSigned, Completed],
            Confirmed => &[ContractSigned, Paid, Completed],
            ContractSigned => &[Paid, Completed],
            Paid => &[Completed],
            Rejected | Completed => &[],
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Still in the sales pipeline: counted as an active order and accepts payments.
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::ContractSigned => "Contract Signed",
            OrderStatus::Paid => "Paid",
            OrderStatus::Completed => "Completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    pub quotation_id: Option<Uuid>,
    pub status: OrderStatus,
    pub order_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::dealers::Entity",
        from = "Column::DealerId",
        to = "super::dealers::Column::Id"
    )]
    Dealers,
    #[sea_orm(
        belongs_to = "super::vehicle_variants::Entity",
        from = "Column::VariantId",
        to = "super::vehicle_variants::Column::Id"
    )]
    VehicleVariants,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::sales_contracts::Entity")]
    SalesContracts,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::dealers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dealers.def()
    }
}

impl Related<super::vehicle_variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleVariants.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::sales_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesContracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::OrderStatus::{self, *};
    use sea_orm::Iterable;

    #[test]
    fn pending_can_be_confirmed_or_rejected() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Confirmed.can_transition_to(Rejected));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn rejected_and_completed_are_terminal() {
        for status in OrderStatus::iter() {
            assert!(!Rejected.can_transition_to(status));
            assert!(!Completed.can_transition_to(status));
        }
        assert!(Rejected.is_terminal());
        assert!(!Paid.is_terminal());
    }

    #[test]
    fn every_open_status_can_complete() {
        for status in OrderStatus::iter().filter(|s| s.is_open()) {
            assert!(status.can_transition_to(Completed), "{status:?}");
        }
    }

    #[test]
    fn contract_signed_serializes_with_space() {
        let json = serde_json::to_string(&ContractSigned).unwrap();
        assert_eq!(json, "\"Contract Signed\"");
        let back: OrderStatus = serde_json::from_str("\"Contract Signed\"").unwrap();
        assert_eq!(back, ContractSigned);
    }
}
