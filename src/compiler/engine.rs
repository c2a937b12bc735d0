//! Transform engine boundary.

use super::{DiagnosticSink, ImportReader};
use crate::core::LogicalPath;

/// A source-to-source transform, invoked once per compile.
///
/// Imports must be read through `imports` so they end up in the dependency
/// set. Returning `None` means the run failed; the engine is expected to have
/// recorded at least one error diagnostic explaining why.
pub trait TransformEngine: Send + Sync {
    fn transform(
        &self,
        source: &str,
        location: &LogicalPath,
        imports: &mut ImportReader<'_>,
        diagnostics: &mut DiagnosticSink,
    ) -> Option<String>;
}
