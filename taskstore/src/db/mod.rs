//! Database layer - connection pool and the task store
//!
//! # Design Principles
//!
//! - Connection pool, cloned into callers - no global handle
//! - One statement per operation, no transactions
//! - Every value reaches SQL as a bound parameter

pub mod pool;
pub mod tasks;

pub use pool::{create_pool, create_pool_from_config, create_pool_with_options};
pub use tasks::TaskStore;
