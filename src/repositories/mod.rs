//! Data access, one module per table.
//!
//! Every function takes any SeaORM [`ConnectionTrait`](sea_orm::ConnectionTrait),
//! so the same call works on the shared connection or inside a transaction.
//! Functions return [`DbErr`](sea_orm::DbErr); business rules live in
//! `services`.

pub mod customers;
pub mod dealer_contracts;
pub mod dealers;
pub mod feedbacks;
pub mod manufacturers;
pub mod orders;
pub mod payments;
pub mod quotations;
pub mod sales_contracts;
pub mod test_drives;
pub mod users;
pub mod variants;
pub mod vehicle_models;

/// `%term%` for case-insensitive substring search.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}
