//! Shared Diesel error mapping for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Constraint violations that a repository treats as domain outcomes should
/// be peeled off with [`constraint_violation`] before falling back to this.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database transaction state lost"),
        _ => query("database error"),
    }
}

/// Integrity constraint a failed statement tripped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

impl ConstraintViolation {
    /// Whether the violated constraint is named `name`.
    pub fn is(&self, name: &str) -> bool {
        let constraint = match self {
            Self::Unique { constraint } | Self::ForeignKey { constraint } => constraint,
        };
        constraint.as_deref() == Some(name)
    }
}

/// Recognise unique and foreign-key violations.
pub fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique { constraint }),
        DatabaseErrorKind::ForeignKeyViolation => {
            Some(ConstraintViolation::ForeignKey { constraint })
        }
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fabricated Diesel database errors for mapping tests.

    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

    struct Info {
        message: String,
        constraint: Option<String>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    pub(crate) fn database_error(kind: DatabaseErrorKind, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(Info {
                message: "fabricated database error".to_owned(),
                constraint: constraint.map(str::to_owned),
            }),
        )
    }
}
