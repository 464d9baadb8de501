//! catalogd - a typed metadata-catalog access service with a REST facade

pub mod cli;
pub mod dispatch;
pub mod errors;
pub mod model;
pub mod observability;
pub mod projector;
pub mod repository;
pub mod rest;
