//! Shared UI components.

pub mod auth;
pub mod layout;
pub mod login_form;
pub mod page_loader;

pub use auth::{AuthContext, AuthProvider, SessionGate, use_auth};
pub use layout::Layout;
pub use login_form::LoginForm;
pub use page_loader::PageLoader;
