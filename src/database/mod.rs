pub mod records;
pub mod repo;
pub mod schema;
