use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum QuotationStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "ContractSigned")]
    #[serde(rename = "Contract Signed")]
    ContractSigned,
}

impl QuotationStatus {
    pub fn allowed_next(self) -> &'static [QuotationStatus] {
        use QuotationStatus::*;
        match self {
            Pending => &[Approved, Rejected],
            Approved => &[Accepted, Rejected],
            Accepted => &[ContractSigned],
            Rejected | ContractSigned => &[],
        }
    }

    pub fn can_transition_to(self, next: QuotationStatus) -> bool {
        self.allowed_next().contains(&next)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quotations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub variant_id: Uuid,
    pub dealer_id: Uuid,
    pub price: i64,
    pub status: QuotationStatus,
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
        belongs_to = "super::vehicle_variants::Entity",
        from = "Column::VariantId",
        to = "super::vehicle_variants::Column::Id"
    )]
    VehicleVariants,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::vehicle_variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleVariants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::QuotationStatus::*;

    #[test]
    fn only_approved_quotations_can_be_accepted() {
        assert!(Approved.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Accepted));
        assert!(!Rejected.can_transition_to(Accepted));
    }

    #[test]
    fn accepted_moves_to_contract_signed_only() {
        assert_eq!(Accepted.allowed_next(), &[ContractSigned]);
        assert!(ContractSigned.allowed_next().is_empty());
    }
}
