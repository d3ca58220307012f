pub mod error;
pub mod local_store;
pub mod validation;
