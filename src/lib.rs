//! Octochat Library
//!
//! A GitHub-styled mock chat screen: a seeded conversation, a text input and
//! a counterpart that answers every message after a short delay.

pub mod chat;
pub mod config;
pub mod runner;

#[cfg(feature = "tui")]
pub mod tui;
