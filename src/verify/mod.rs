//! Package verification.
//!
//! Verification re-invokes the owning manager's check command for a package
//! and persists the outcome keyed by package identity, so status survives
//! process restarts. Only the latest result is kept per identity.

pub mod status;
pub mod verifier;

pub use status::{BatchSummary, VerificationStatus, VerifyState};
pub use verifier::Verifier;
