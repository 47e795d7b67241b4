//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route.

pub mod dashboard;
pub mod not_found;
pub mod templates;

// Re-export all page components for convenient access
pub use dashboard::DashboardPage;
pub use not_found::NotFoundPage;
pub use templates::TemplatesPage;
