//! API handlers for Bookloan REST endpoints

pub mod books;
pub mod borrow;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::{AppError, AppResult};

/// Coarse caller classification carried by the trusted `x-user-role` header.
///
/// This is a simulation of authentication, not a security boundary: the
/// header is taken at face value. A production deployment must replace it
/// with verified credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May create, update and delete books
    Admin,
    /// May borrow and return books
    Borrower,
}

impl Role {
    fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::Borrower),
            _ => None,
        }
    }
}

/// Extractor for the caller's role from the x-user-role header
pub struct CallerRole(pub Option<Role>);

impl CallerRole {
    pub fn require(&self, role: Role) -> AppResult<()> {
        if self.0 == Some(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Access denied. Insufficient permissions.".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerRole
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|value| value.to_str().ok())
            .and_then(Role::parse);

        Ok(CallerRole(role))
    }
}

/// Extractor for the caller's identity from the x-user-id header.
///
/// A missing header is not rejected here: operations that need an identity
/// report it as a validation failure, keeping the precondition ordering
/// with the operation itself.
pub struct CallerIdentity(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Ok(CallerIdentity(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_header_values_map_to_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::Borrower));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn require_rejects_missing_and_mismatched_roles() {
        assert!(CallerRole(Some(Role::Admin)).require(Role::Admin).is_ok());
        assert!(CallerRole(Some(Role::Borrower)).require(Role::Admin).is_err());
        assert!(CallerRole(None).require(Role::Borrower).is_err());
    }
}
