//! Internal crate for `yagl`.
//!
//! This module is separated into its own crate to enable simple dynamic linking for
//! `yagl`, and to host the optional `config`-crate-backed [`Context`](yagl_core::Context)
//! loader. It should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use yagl_internal::prelude::*;
//!
//! let package = Package::new(ContainerFormat::V1);
//! let ctx = Context::default();
//! let bytes = encode(&package, &ctx).expect("encoding an empty package never fails");
//! assert_eq!(bytes, vec![0x00, 0x00]);
//! ```

/// `use yagl_internal::prelude::*;` to import commonly used items.
pub mod prelude;

pub mod config;

// Re-export yagl_core for convenience
pub use yagl_core;
