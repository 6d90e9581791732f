pub mod common;
pub mod config;
pub mod file;
pub mod operation;
pub mod remote;
pub mod share;
pub mod storage;
pub mod utils;
