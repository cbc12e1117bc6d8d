//! Prelude module for `yagl_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
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

// Re-export everything from yagl_core::prelude
#[doc(inline)]
pub use yagl_core::prelude::*;

// Re-export the entire yagl_core module for advanced usage
#[doc(inline)]
pub use yagl_core;

#[doc(inline)]
pub use crate::config::load_context;
