pub mod config;
pub mod namespace;
pub mod pod;
pub mod validate;
