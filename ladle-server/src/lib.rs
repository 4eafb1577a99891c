//! Ladle: a community food recommendation board.
//!
//! Visitors submit places to eat near MRT stations, tagged by cuisine and
//! price, and search what others have shared.

pub mod config;
pub mod domain;
pub mod geo;
pub mod service;
pub mod store;
pub mod validation;
pub mod web;
