//! Promotional content generator for small merchants (UMKM).
//!
//! Turns a product form into platform-specific captions, a seven-day content
//! calendar and a square promo poster, using Gemini for text and Imagen for
//! the poster.

pub mod ai;
pub mod app;
pub mod error;
pub mod generator;
pub mod models;
pub mod prompts;
pub mod request;
pub mod theme;
pub mod view;

pub use error::{Error, Result};
