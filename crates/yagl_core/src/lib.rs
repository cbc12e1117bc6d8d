//! Core codec for the `yagl` round-tripping format: decodes a NewGRF-style
//! binary transport-sim package into its textual YAGL representation, and
//! re-encodes a byte-for-byte equivalent package from an edited script.
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

pub mod chunk;
pub mod container_format;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod grouping;
pub mod package;
pub mod pixel;
pub mod prelude;
pub mod property;
pub mod record;
pub mod stream;
pub mod text;

pub use context::Context;
pub use error::YaglError;
pub use package::{decode, encode, parse, print, ContainerFormat, Package, SpriteMap};
