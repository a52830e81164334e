// Library for tests to access modules

pub mod alert_sink;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod monitor;
pub mod publisher;
pub mod report;
pub mod routes;
pub mod sampler;
pub mod scheduler;
pub mod source;
pub mod sysinfo_repo;
