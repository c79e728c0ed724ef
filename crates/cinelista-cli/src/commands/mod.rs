pub mod browse;
pub mod clear;
pub mod config;
pub mod saved;
