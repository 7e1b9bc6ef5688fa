//! Trivia quiz REST API: categories, questions and random quiz rounds over
//! SQLite.

pub mod db;
pub mod quiz;
pub mod seed;
pub mod server;
pub mod settings;
pub mod telemetry;
