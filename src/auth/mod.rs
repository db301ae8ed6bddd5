//! Session and credential subsystem.
//!
//! # Data Flow
//! ```text
//! login/registration response
//!     → session.rs (decode claims, reject undecodable credentials)
//!     → store.rs (access + refresh slots, set together)
//!
//! startup
//!     → session.rs restore() reads store.rs
//!     → claims.rs decode; expired/malformed → clear both slots
//!
//! pipeline renewal failure
//!     → store.rs clear_all()
//!     → events.rs SessionEvent::Terminated broadcast
//! ```
//!
//! # Design Decisions
//! - Identity is always derived from the access credential, never stored
//! - The signature is never verified here; that is the issuing server's
//!   job. Only the payload segment is decoded.
//! - The store is a trait so tests swap in an in-memory fake

pub mod claims;
pub mod events;
pub mod session;
pub mod store;

pub use claims::{decode, Claims, DecodeError, Role};
pub use events::{SessionEvent, SessionEvents};
pub use session::{SessionIdentity, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
