mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{parse_role, parse_token_table, StaticTokenVerifier};
pub use traits::{Result, TokenVerifier};
pub use types::{BearerToken, Principal, Role};
