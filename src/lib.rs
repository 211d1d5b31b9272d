//! # Anime Schedule Bot
//!
//! A Telegram bot that answers "what airs today?" for anime fans and lets each
//! user keep a personal watch list to narrow the schedule down.
//!
//! ## Features
//! - Daily, tomorrow and per-weekday broadcast schedules
//! - Sub/dub/raw airings of the same title merged into one entry
//! - Per-user custom lists (add, remove, list, clear, filter by day)
//! - Pluggable list storage: JSON document or SQLite
//! - Health endpoints for container orchestration

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// SQLite connection and custom list models
pub mod database;
/// Schedule fetching, aggregation, custom lists and health checks
pub mod services;
/// Custom list storage backends
pub mod storage;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
