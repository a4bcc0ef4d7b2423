//! Domain Layer
//!
//! Session entities and error types shared by the gate and auth client.

mod error;
mod session;

pub use error::{GateError, SessionError};
pub use session::{AuthUser, Session};
