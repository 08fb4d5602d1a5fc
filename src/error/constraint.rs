use sqlx::postgres::PgDatabaseError;

use crate::error::ExceptionResult;

/// Placeholder used when the offending column cannot be read from the error detail.
pub const UNKNOWN_KEY_NAME: &str = "unknownKeyName";

const KEY_MARKER: &str = "Key (";

/// Postgres SQLSTATE codes that are translated into client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgErrorCode {
    NullValueNotAllowed,
    NotNullViolation,
    ForeignKeyViolation,
    UniqueViolation,
}

impl PgErrorCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "22004" => Some(PgErrorCode::NullValueNotAllowed),
            "23502" => Some(PgErrorCode::NotNullViolation),
            "23503" => Some(PgErrorCode::ForeignKeyViolation),
            "23505" => Some(PgErrorCode::UniqueViolation),
            _ => None,
        }
    }

}

/// The parts of a failed statement's driver error that the translation needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverError {
    pub code: String,
    pub detail: Option<String>,
    pub table: Option<String>,
}

impl DriverError {
    pub fn new(
        code: impl Into<String>,
        detail: Option<&str>,
        table: Option<&str>,
    ) -> Self {
        DriverError {
            code: code.into(),
            detail: detail.map(str::to_owned),
            table: table.map(str::to_owned),
        }
    }

    /// Extracts code, detail and table from a database error reported by sqlx.
    /// Returns `None` for errors that did not come from the database server.
    pub fn from_sqlx_error(error: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_error) = error else {
            return None;
        };
        let code = db_error.code()?.into_owned();
        let pg = db_error.try_downcast_ref::<PgDatabaseError>();
        Some(DriverError {
            code,
            detail: pg.and_then(|e| e.detail()).map(str::to_owned),
            table: pg.and_then(|e| e.table()).map(str::to_owned),
        })
    }
}

/// A classified constraint violation, ready to be rendered as an API error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    NotNull { column: String },
    ForeignKey { column: String },
    Unique { entity: String, column: String },
}

impl ConstraintViolation {
    /// Classifies a driver error. Codes outside the known set yield `None` and
    /// must be handled by the caller as unclassified failures.
    pub fn classify(error: &DriverError) -> Option<Self> {
        let column = key_from_detail(error.detail.as_deref());
        let violation = match PgErrorCode::from_code(&error.code)? {
            PgErrorCode::NullValueNotAllowed | PgErrorCode::NotNullViolation => {
                ConstraintViolation::NotNull { column }
            }
            PgErrorCode::ForeignKeyViolation => ConstraintViolation::ForeignKey { column },
            PgErrorCode::UniqueViolation => ConstraintViolation::Unique {
                entity: name_from_table(error.table.as_deref().unwrap_or_default()),
                column,
            },
        };
        Some(violation)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ConstraintViolation::NotNull { .. } | ConstraintViolation::ForeignKey { .. } => 400,
            ConstraintViolation::Unique { .. } => 409,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConstraintViolation::NotNull { column } => {
                format!("The value of '{}' cannot be null", column)
            }
            ConstraintViolation::ForeignKey { column } => {
                format!("The value of '{}' is invalid", column)
            }
            ConstraintViolation::Unique { entity, column } => {
                format!("There is already a {} with the same {}", entity, column)
            }
        }
    }
}

impl From<ConstraintViolation> for ExceptionResult {
    fn from(violation: ConstraintViolation) -> Self {
        // Unique violations keep the "Bad Request" error class alongside 409.
        ExceptionResult {
            status_code: violation.status_code(),
            error: "Bad Request".to_string(),
            message: violation.message(),
        }
    }
}

/// Reads the column out of a detail such as `Key (workspace_id)=(..) is not present`
/// and names it the way API payloads do, so `workspace_id` becomes `workspaceId`.
pub fn key_from_detail(detail: Option<&str>) -> String {
    detail
        .and_then(|d| d.strip_prefix(KEY_MARKER))
        .and_then(|rest| rest.split(')').next())
        .map(snake_to_camel)
        .unwrap_or_else(|| UNKNOWN_KEY_NAME.to_string())
}

fn snake_to_camel(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut upper = false;
    for c in column.chars() {
        if c == '_' && !out.is_empty() {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Naive singular display name: `products` becomes `Product`.
pub fn name_from_table(table: &str) -> String {
    let mut chars = table.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut rest: Vec<char> = chars.collect();
    rest.pop();
    first.to_uppercase().chain(rest).collect()
}
