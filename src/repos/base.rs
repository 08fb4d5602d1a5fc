use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder, postgres::PgRow};
use uuid::Uuid;

/// Columns owned by the store. Inputs never write them.
pub const BASE_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

/// A persisted record with a store-assigned id and timestamps.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    fn get_table_name() -> &'static str;

    /// Every column of the table, base columns included, in select order.
    fn columns() -> &'static [&'static str];

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// A single column value carried by a create or update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(Option<String>),
    Uuid(Option<Uuid>),
}

impl FieldValue {
    pub fn push_bind(self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            FieldValue::Text(v) => qb.push_bind(v),
            FieldValue::Uuid(v) => qb.push_bind(v),
        };
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(Some(v))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(Some(v))
    }
}

pub type Fields = Vec<(&'static str, FieldValue)>;

/// Turns an input into the `(column, value)` pairs it actually carries.
/// Update inputs omit the fields that were not supplied.
pub trait Changeset: Send {
    fn into_fields(self) -> Fields;
}

/// What an insert does when it hits a uniqueness conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// The violation is reported as an error.
    #[default]
    Error,
    /// The row is silently skipped and the create yields nothing.
    DoNothing,
}

pub(crate) fn strip_base_columns(mut fields: Fields) -> Fields {
    fields.retain(|(column, _)| !BASE_COLUMNS.contains(column));
    fields
}
