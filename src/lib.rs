//! Content-addressed asset urls and stylesheet compilation.
//!
//! - [`url::UrlGenerator`] turns logical paths (`~/css/site.css`), assets and
//!   bundles into public urls whose identity follows their content.
//! - [`compiler::Compiler`] compiles a stylesheet and reports every source it
//!   pulled in, so callers know what invalidates the output.

pub mod logger;

pub mod asset;
pub mod compiler;
pub mod config;
pub mod core;
pub mod error;
pub mod url;

pub use error::{Error, Result};
