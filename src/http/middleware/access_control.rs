//! Access control for the administrator segment.
//!
//! The registry only classifies paths. Deciding who may see an
//! administrator view is delegated to an [`AccessGuard`], so deployments can
//! plug in their own session or role checks.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::routing::Segment;

/// Reason a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("missing Authorization header")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Decides whether a request may reach a route in the given segment.
pub trait AccessGuard: Send + Sync + std::fmt::Debug {
    fn authorize(&self, segment: Segment, headers: &HeaderMap) -> Result<(), AccessDenied>;
}

/// Lets every request through. Development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessGuard for AllowAll {
    fn authorize(&self, _segment: Segment, _headers: &HeaderMap) -> Result<(), AccessDenied> {
        Ok(())
    }
}

/// Requires `Authorization: Bearer <api_key>` for privileged segments.
#[derive(Clone)]
pub struct BearerTokenGuard {
    api_key: String,
}

impl BearerTokenGuard {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for BearerTokenGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenGuard").finish_non_exhaustive()
    }
}

impl AccessGuard for BearerTokenGuard {
    fn authorize(&self, segment: Segment, headers: &HeaderMap) -> Result<(), AccessDenied> {
        if !segment.requires_privilege() {
            return Ok(());
        }

        let auth_val = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AccessDenied::MissingCredentials)?;

        match auth_val.strip_prefix("Bearer ") {
            Some(token) if token == self.api_key => Ok(()),
            _ => Err(AccessDenied::InvalidCredentials),
        }
    }
}
