mod app_error;
mod constraint_parser;
mod database_converter;
mod field_errors;

pub use app_error::{AppError, AppResult, Resource};
pub use constraint_parser::{ConstraintParser, ConstraintViolation};
pub use database_converter::DatabaseErrorConverter;
pub use field_errors::FieldErrors;
