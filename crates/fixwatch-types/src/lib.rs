pub mod error;
pub mod filter;
pub mod models;
pub mod run;

pub use error::{Error, Result};
pub use filter::CategoryFilter;
pub use models::*;
pub use run::{derive_branch_name, RunParams, RunSession, DEFAULT_RETRY_LIMIT};
