pub mod postgres_feedback_repository;
pub mod postgres_post_repository;
pub mod postgres_user_repository;

pub use postgres_feedback_repository::PostgresFeedbackRepository;
pub use postgres_post_repository::PostgresPostRepository;
pub use postgres_user_repository::PostgresUserRepository;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Constraint violations surface as integrity errors (HTTP 400); everything
/// else is a plain database failure.
pub(crate) fn is_integrity_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
            _
        )
    )
}
