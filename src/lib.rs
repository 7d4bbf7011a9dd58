// Library for tests to access modules

pub mod chart;
pub mod config;
pub mod dispatcher;
pub mod metrics_repo;
pub mod models;
pub mod parser;
pub mod routes;
pub mod slack;
pub mod version;
