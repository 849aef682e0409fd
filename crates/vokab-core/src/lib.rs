pub mod classify;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod preprocess;
pub mod store;
