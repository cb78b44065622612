pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod precipitation;
pub mod state;
pub mod stations;
pub mod temperature;

#[cfg(test)]
mod testing;
