pub mod admin;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod dealers;
pub mod feedbacks;
pub mod sales;
pub mod test_drives;
pub mod vehicles;
