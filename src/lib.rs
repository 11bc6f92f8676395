//! Derived financial state for a personal finance client.
//!
//! The backend stores profiles, budgets, savings goals and transactions.
//! This crate turns what it returns into the figures every view shows: the
//! available balance, budget consumption tiers and alerts, target-expense
//! warnings, goal progress, reports and forecasts.

pub mod api;
pub mod calc;
pub mod config;
pub mod error;
pub mod events;
pub mod forecast;
pub mod models;
pub mod reports;
pub mod workspace;

pub use error::{Error, Result};
