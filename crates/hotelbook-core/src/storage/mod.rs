pub mod json_store;
pub mod repositories;

pub use json_store::JsonStore;
