//! Domain layer for the feedback tracker.
//!
//! Pure types and functions only: no I/O, no async. Persistence lives in
//! `feedback-db`, application state in `feedback-app`.

pub mod error;
pub mod feedback;
pub mod selection;
pub mod session;
pub mod theme;
pub mod types;
pub mod view;
