//! Authentication module
//!
//! Argon2 password hashing, HS256 session tokens, and the session guard
//! middleware for protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, SessionIdentity, TokenError};
pub use middleware::{session_guard, session_token, AuthUser};
pub use password::{PasswordError, PasswordService};
