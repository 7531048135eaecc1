pub mod config;
pub mod info;
pub mod recent;
pub mod utils;
