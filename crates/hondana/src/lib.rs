#[macro_use]
extern crate log;

pub mod cache;
pub mod config;
pub mod library;
pub mod presentation;
