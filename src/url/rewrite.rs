//! Final rewriting step applied to every generated url.

use std::fmt;
use std::sync::Arc;

type RewriteFn = dyn Fn(&str) -> String + Send + Sync;

/// Url rewrite hook (host, protocol, CDN mapping, virtual directory).
///
/// Total: every variant maps any input to some output.
#[derive(Clone, Default)]
pub enum UrlRewrite {
    /// Leave urls unchanged.
    #[default]
    Identity,
    /// Prepend a base such as `/` or `https://cdn.example.com/app/`.
    Prepend(Arc<str>),
    /// Arbitrary caller-supplied mapping.
    Custom(Arc<RewriteFn>),
}

impl UrlRewrite {
    pub fn prepend(base: impl Into<Arc<str>>) -> Self {
        Self::Prepend(base.into())
    }

    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn apply(&self, url: &str) -> String {
        match self {
            Self::Identity => url.to_string(),
            Self::Prepend(base) => join_base(base, url),
            Self::Custom(f) => f(url),
        }
    }
}

/// Join with exactly one `/` between base and url when both carry one.
fn join_base(base: &str, url: &str) -> String {
    match (base.ends_with('/'), url.starts_with('/')) {
        (true, true) => format!("{}{}", base, &url[1..]),
        _ => format!("{base}{url}"),
    }
}

impl fmt::Debug for UrlRewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Prepend(base) => f.debug_tuple("Prepend").field(base).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
