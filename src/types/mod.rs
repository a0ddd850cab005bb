pub mod challenge;
pub mod config;
pub mod report;
pub mod roadmap;
pub mod scoring;
pub mod use_case;
