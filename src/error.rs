pub mod app;
pub mod constraint;
pub mod db;

pub use app::{AppError, ExceptionResult};
pub use constraint::{ConstraintViolation, DriverError, PgErrorCode};
pub use db::DatabaseError;
