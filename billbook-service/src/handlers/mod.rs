pub mod auth;
pub mod businesses;
pub mod customers;
pub mod expenses;
pub mod invoices;
pub mod payments;
pub mod products;
pub mod reports;
pub mod solar;
pub mod vendors;
