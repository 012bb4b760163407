//! Typed access to the keys of the persistence boundary.

pub mod feedback_repo;
pub mod session_repo;
pub mod theme_repo;

pub use feedback_repo::FeedbackRepo;
pub use session_repo::SessionRepo;
pub use theme_repo::ThemeRepo;
