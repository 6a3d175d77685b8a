pub mod dashboard;
pub mod health;
pub mod reports;
pub mod sales;
