//! Borrow/return service
//!
//! Precondition checks run in a fixed order so each failure is reported
//! distinctly: identity, then request fields, then (inside the repository
//! transaction) existence and stock/state checks.

use crate::{
    error::{AppError, AppResult},
    models::borrow_log::{
        BorrowLog, BorrowLogDetails, BorrowRequest, CreateBorrow, ReturnRequest,
    },
    repository::Repository,
};

fn validate_latitude(latitude: f64) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation(
            "Latitude must be a number between -90 and 90".to_string(),
        ));
    }
    Ok(())
}

fn validate_longitude(longitude: f64) -> AppResult<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(
            "Longitude must be a number between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

fn require_identity(identity: Option<String>) -> AppResult<String> {
    identity
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("User ID is missing (x-user-id header required)".to_string())
        })
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List borrow logs with an optional user filter, newest first
    pub async fn list(&self, user_id: Option<&str>) -> AppResult<Vec<BorrowLogDetails>> {
        self.repository.borrow_logs.list(user_id).await
    }

    /// Borrow a book on behalf of the identified caller
    pub async fn borrow(
        &self,
        identity: Option<String>,
        request: BorrowRequest,
    ) -> AppResult<BorrowLog> {
        let user_id = require_identity(identity)?;

        let book_id = request
            .book_id
            .ok_or_else(|| AppError::Validation("Book ID is required".to_string()))?;

        let latitude = request
            .latitude
            .ok_or_else(|| AppError::Validation("Latitude is required".to_string()))?;
        validate_latitude(latitude)?;

        let longitude = request
            .longitude
            .ok_or_else(|| AppError::Validation("Longitude is required".to_string()))?;
        validate_longitude(longitude)?;

        self.repository
            .borrow_logs
            .borrow(&CreateBorrow {
                user_id,
                book_id,
                latitude,
                longitude,
            })
            .await
    }

    /// Return a borrowed book; only the borrower may close their own loan
    pub async fn return_borrow(
        &self,
        identity: Option<String>,
        request: ReturnRequest,
    ) -> AppResult<BorrowLog> {
        let user_id = require_identity(identity)?;

        let borrow_id = request
            .borrow_id
            .ok_or_else(|| AppError::Validation("Borrow ID is required".to_string()))?;

        self.repository
            .borrow_logs
            .return_borrow(borrow_id, &user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_bounds_are_inclusive() {
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(0.0).is_ok());
        assert!(matches!(
            validate_latitude(90.0001),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_latitude(-90.0001),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn longitude_bounds_are_inclusive() {
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(matches!(
            validate_longitude(180.5),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_longitude(-181.0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_longitude(f64::INFINITY).is_err());
    }

    #[test]
    fn identity_must_be_present_and_non_blank() {
        assert_eq!(require_identity(Some("alice".to_string())).unwrap(), "alice");
        assert!(matches!(
            require_identity(None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            require_identity(Some("   ".to_string())),
            Err(AppError::Validation(_))
        ));
    }
}
