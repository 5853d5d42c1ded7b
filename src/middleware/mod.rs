//! Middleware
//!
//! Este módulo contiene los middlewares HTTP.

pub mod cors;
