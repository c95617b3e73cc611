//! Caller identity, as verified by the upstream token check.
//!
//! The gateway validates the signed token and forwards the subject as
//! `X-User-Id` and the role as `X-User-Role`. Handlers take a [`Caller`]
//! argument to require one.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim() {
            "admin" => Some(Role::Admin),
            "member" | "" => Some(Role::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self, action: &str) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!("only admins can {action}")))
        }
    }

    /// Authors manage their own records; admins manage everyone's.
    pub fn require_owner_or_admin(&self, owner_id: i64, action: &str) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!("not allowed to {action}")))
        }
    }

    fn from_request_headers(req: &HttpRequest) -> Result<Caller, AppError> {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };

        let user_id = header(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("missing caller identity".to_string()))?
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Unauthorized("malformed caller identity".to_string()))?;

        let role = match header(USER_ROLE_HEADER) {
            Some(raw) => Role::parse(raw)
                .ok_or_else(|| AppError::Unauthorized(format!("unknown role '{raw}'")))?,
            None => Role::Member,
        };

        Ok(Caller { user_id, role })
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = Caller::from_request_headers(req);
        if let Err(e) = &result {
            log::warn!("Rejected request to {}: {e}", req.path());
        }
        ready(result)
    }
}
