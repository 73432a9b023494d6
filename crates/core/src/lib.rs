//! Core types for repofeed
//!
//! Domain types, paging policy and the failure taxonomy shared by the
//! remote, storage and service crates.

pub mod constants;
pub mod env_config;
mod error;
mod outcome;
mod paging;
mod repo;
mod view;

pub use error::*;
pub use outcome::*;
pub use paging::*;
pub use repo::*;
pub use view::*;
