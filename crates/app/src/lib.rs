//! Feedback tracker application layer.
//!
//! - [`store::FeedbackStore`] owns the feedback collection.
//! - [`session::SessionStore`] owns the mock login session.
//! - [`routes`] gates the dashboard behind a session.
//! - [`commands`] runs parsed [`cli`] commands against [`state::AppState`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
