//! Time-bound QR attendance credentials.
//!
//! Issuance gates on session liveness; verification re-checks liveness,
//! integrity, and expiry before the idempotent check-in write.

pub mod issuer;
pub mod token;
pub mod verifier;
