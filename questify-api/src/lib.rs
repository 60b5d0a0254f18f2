//! # Questify API Server Library
//!
//! Core functionality for the Questify API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `response`: Success response envelope
//! - `middleware`: Custom middleware (security headers)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
