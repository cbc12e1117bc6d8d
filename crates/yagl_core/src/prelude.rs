//! Prelude module for `yagl_core`.
//!
//! This module provides a convenient way to import the codec's common
//! entry points.
//!
//! # Examples
//!
//! ```rust
//! use yagl_core::prelude::*;
//!
//! let package = Package::new(ContainerFormat::V1);
//! let ctx = Context::default();
//! let bytes = encode(&package, &ctx).expect("encoding an empty package never fails");
//! assert_eq!(bytes, vec![0x00, 0x00]);
//! ```

#[doc(inline)]
pub use crate::context::Context;

#[doc(inline)]
pub use crate::error::YaglError;

#[doc(inline)]
pub use crate::package::{decode, encode, parse, print, ContainerFormat, Package, SpriteMap};

#[doc(inline)]
pub use crate::record::{Record, RecordKind};
