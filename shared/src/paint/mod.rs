pub mod error;
pub mod paint_entry;
pub mod paint_store;
