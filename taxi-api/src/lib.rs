//! # Taxi API Server Library
//!
//! HTTP surface of the taxi fleet service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: JSON body extractor with JSON rejections
//! - `pagination`: Page-numbered list responses
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod routes;
