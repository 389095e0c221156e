// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This is ectee
//!
//! The token side translation layer between PKCS#11 EC and EdDSA key
//! objects and a secure key provider exposing the GlobalPlatform TEE
//! object model. It identifies curves from `CKA_EC_PARAMS`, generates key
//! pairs through the provider, marshals key attributes in both directions
//! and resolves mechanisms to provider algorithms.

pub use pkcs11;
pub use tee;

pub mod attribute;
pub mod config;
pub mod ec;
pub mod error;
pub mod mechanism;
pub mod object;
pub mod serialargs;

#[cfg(feature = "trace")]
mod log;

#[cfg(feature = "trace")]
pub use crate::log::ectee_log_init;

#[cfg(test)]
mod tests;
