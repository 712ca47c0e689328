//! Terminal dashboard for live CPU, memory and process metrics.
//!
//! The [`app::Dashboard`] controller polls a [`bridge::MetricsBackend`] on a
//! timer, folds each snapshot into [`view::DashboardView`] and forwards kill
//! requests back to the backend. [`ui`] draws the view with ratatui.

pub mod action;
pub mod app;
pub mod bridge;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod system;
pub mod ui;
pub mod view;
