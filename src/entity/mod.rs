pub mod audit_logs;
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
pub mod vehicle_models;
pub mod vehicle_variants;

pub use audit_logs::Entity as AuditLogs;
pub use customers::Entity as Customers;
pub use dealer_contracts::Entity as DealerContracts;
pub use dealers::Entity as Dealers;
pub use feedbacks::Entity as Feedbacks;
pub use manufacturers::Entity as Manufacturers;
pub use orders::Entity as Orders;
pub use payments::Entity as Payments;
pub use quotations::Entity as Quotations;
pub use sales_contracts::Entity as SalesContracts;
pub use test_drives::Entity as TestDrives;
pub use users::Entity as Users;
pub use vehicle_models::Entity as VehicleModels;
pub use vehicle_variants::Entity as VehicleVariants;
