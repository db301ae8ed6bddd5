//! Session identity and lifecycle.

use serde::Serialize;
use std::sync::Arc;

use crate::auth::claims::{self, Claims, DecodeError, Role};
use crate::auth::store::TokenStore;

/// Who the current credential says we are. Always derived from the
/// access credential's claims, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionIdentity {
    pub subject_id: u64,
    pub display_name: String,
    pub role: Role,
}

impl From<Claims> for SessionIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.subject_id,
            display_name: claims.display_name,
            role: claims.role,
        }
    }
}

/// Login, logout, and startup reconciliation over a credential store.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Derive the current identity from stored credentials.
    ///
    /// A missing, undecodable, or expired access credential resolves to
    /// "no session"; stale credentials are cleared on the way out so the
    /// store never holds a credential we know to be unusable.
    pub fn restore(&self) -> Option<SessionIdentity> {
        let access = self.store.access()?;
        match claims::decode(&access) {
            Ok(claims) if !claims.is_expired() => Some(claims.into()),
            Ok(_) => {
                tracing::debug!("Stored access credential expired, clearing session");
                self.store.clear_all();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored access credential undecodable, clearing session");
                self.store.clear_all();
                None
            }
        }
    }

    /// Record a fresh credential pair from a login or registration
    /// exchange. The access credential is decoded first; an undecodable
    /// credential is rejected without touching the store.
    pub fn login(&self, access: &str, refresh: &str) -> Result<SessionIdentity, DecodeError> {
        let claims = claims::decode(access)?;
        self.store.store_pair(access, refresh);
        tracing::info!(subject_id = claims.subject_id, role = %claims.role, "Session established");
        Ok(claims.into())
    }

    /// Clear the session. Safe no-op when no session exists.
    pub fn logout(&self) {
        self.store.clear_all();
        tracing::info!("Session cleared");
    }
}
