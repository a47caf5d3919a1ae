pub mod connection;
pub mod enums;
pub mod fields;
pub mod inputs;
pub mod query;
pub mod schema;
