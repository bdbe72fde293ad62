pub mod app;
pub mod commit;
pub mod config;
pub mod exec;
pub mod parser;
pub mod repo;
pub mod report;
pub mod vcs;
pub mod version;
