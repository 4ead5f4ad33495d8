//! Database access for the tuin/lkb content migration.

pub mod database;
pub mod error;
pub mod report;
pub mod utils;

pub use error::{Result, StoreError};
