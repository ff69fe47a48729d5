pub mod action;
pub mod envelope;
pub mod error;
