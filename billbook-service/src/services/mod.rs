pub mod database;
pub mod jwt;
pub mod sequence;

pub use database::BillbookDb;
pub use jwt::{AuthClaims, JwtService};
pub use sequence::DocumentFamily;
