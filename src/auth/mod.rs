//! Authentication
//!
//! Password hashing, bearer-token sessions, and the request extractors
//! that resolve a token back to a user row.

mod extract;
mod password;
mod session;

pub use extract::{AuthUser, MaybeAuthUser};
pub(crate) use extract::bearer_token;
pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStore};
