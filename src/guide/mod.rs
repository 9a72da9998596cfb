pub mod blob_store;
pub mod catalog;
pub mod categories;
pub mod checker;
pub mod config;
pub mod index_store;
pub mod paths;
pub mod record;
