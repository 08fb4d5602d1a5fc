pub mod health;
pub mod products;
pub mod version;
pub mod workspaces;
