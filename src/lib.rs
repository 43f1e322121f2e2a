pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod listview;
pub mod model;
pub mod output;
pub mod session;

#[cfg(test)]
mod tests;
