#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `yagl` decodes a NewGRF-style binary transport-sim package into its textual
//! YAGL representation, and re-encodes a byte-for-byte equivalent package from
//! an edited script.
pub use yagl_internal::*;
