//! The admin session gate: credentials, the encrypted session cookie, and the
//! extractor and middleware that read it.

mod cookie;
mod credentials;
mod middleware;
mod password;
mod token;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub(crate) use cookie::{invalidate_session_cookie, set_session_cookie};
pub use credentials::AdminCredentials;
pub use middleware::{AuthContext, AuthState, admin_guard};
pub use password::{PasswordHash, ValidatedPassword};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
