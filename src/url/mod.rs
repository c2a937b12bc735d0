//! Public url generation.
//!
//! Every url kind is composed by [`UrlKind::compose`] and then handed to the
//! configured [`UrlRewrite`].

mod generator;
mod kind;
mod rewrite;

pub use generator::{UrlConfig, UrlGenerator};
pub use kind::UrlKind;
pub use rewrite::UrlRewrite;
