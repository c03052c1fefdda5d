pub mod config;
pub mod drift;
pub mod output;
pub mod report;
pub mod state;
pub mod storage;
