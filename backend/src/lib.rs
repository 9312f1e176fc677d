//! Music Catalog Backend Library
//!
//! Membership (signup/login with session tokens) and Spotify-backed track
//! search, exposed as modules for the binary and the integration tests.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod spotify;
pub mod state;
