pub mod competitors;
pub mod customers;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod health;
pub mod orders;
pub mod products;

pub use error::{ApiError, AppError};
