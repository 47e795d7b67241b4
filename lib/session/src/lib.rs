//! Authenticated-session lifecycle for the EzDoc web shell.
//!
//! This crate provides:
//! - The session model (`SessionStatus`, `Profile`) and its state machine
//!   (`Session`, `SessionEvent`)
//! - The session gate decision (`GateView`) and its actions (`sign_in`,
//!   `sign_out`, `retry`)
//! - Post-sign-in URL cleanup (`RedirectNormalizer`)
//! - The collaborator and location seams (`AuthClient`, `LocationPort`)
//! - Cognito user pool configuration (`CognitoConfig`)
//! - Page-load resolution (`resolve_session`) over persisted sign-in state
//!   (`KeyValueStore`)
//!
//! # Example
//!
//! ```
//! use ezdoc_session::{
//!     GateView, MemoryLocation, Normalization, Profile, RedirectNormalizer, Session,
//!     SessionEvent,
//! };
//!
//! let mut session = Session::new();
//! assert_eq!(GateView::for_status(session.status()), GateView::Placeholder);
//!
//! // The provider redirected back and the collaborator resolved the user.
//! let mut location = MemoryLocation::new("https://app.example/?code=abc&state=xyz&foo=bar");
//! session
//!     .apply(SessionEvent::Resolved(Profile::new("sub-123", "access-token")))
//!     .unwrap();
//!
//! let mut normalizer = RedirectNormalizer::new();
//! let outcome = normalizer.observe(session.status(), &mut location).unwrap();
//! assert_eq!(
//!     outcome,
//!     Normalization::Replaced("https://app.example/?foo=bar".to_string())
//! );
//! ```

pub mod client;
pub mod cognito;
pub mod error;
pub mod gate;
pub mod location;
pub mod normalizer;
pub mod resolve;
pub mod session;
pub mod status;
pub mod storage;

// Re-export main types at crate root
pub use client::{AuthClient, AuthSettings};
pub use cognito::CognitoConfig;
pub use error::{AuthResolutionError, SessionError};
pub use gate::{GateView, retry, sign_in, sign_out};
pub use location::{LocationPort, MemoryLocation};
pub use normalizer::{CALLBACK_PARAMS, Normalization, RedirectNormalizer, strip_callback_params};
pub use resolve::{Callback, SigninCompleter, parse_callback, resolve_session};
pub use session::{Session, SessionEvent};
pub use status::{Profile, SessionStatus};
pub use storage::{KeyValueStore, MemoryStore, PendingSignin};
