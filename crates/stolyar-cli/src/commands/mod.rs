pub mod fields;
pub mod fmt;
pub mod types;
