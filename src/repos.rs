pub mod base;
pub mod crud;
pub mod product;
pub mod storage;
pub mod workspace;

pub use base::{Changeset, Entity, FieldValue, Fields, OnConflict};
pub use crud::CrudService;
pub use storage::{PgStorage, Storage};
