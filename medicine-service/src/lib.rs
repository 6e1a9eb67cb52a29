//! medicine-service: CRUD over the pharmacy's medicine collection.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
