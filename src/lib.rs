// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod counter_store;
pub mod error;
pub mod history;
pub mod models;
pub mod query;
pub mod rollover;
pub mod routes;
pub mod service;
