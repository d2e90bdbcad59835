pub mod bid_store;
pub mod codec;
pub mod config;
pub mod deployment;
pub mod error;
pub mod handlers;
pub mod marketplace;
pub mod random;
pub mod simulation;
