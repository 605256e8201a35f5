mod error;
mod functions;
mod types;

pub use error::AuthError;
pub use functions::{extract_token, is_expired};
pub use types::Claims;
