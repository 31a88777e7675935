//! Infrastructure layer - storage, cache and service implementations

pub mod cache;
pub mod catalog;
pub mod logging;
pub mod relation;
pub mod storage;
