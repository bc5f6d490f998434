//! Application-side helpers built on the configuration record

pub mod creator;
pub mod store;
