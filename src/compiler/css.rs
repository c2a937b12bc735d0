//! Stylesheet engine using lightningcss.
//!
//! Runs in two passes:
//! 1. Gather: walk `@import` rules breadth-first, reading every imported
//!    file through the [`ImportReader`] (which records it).
//! 2. Bundle: inline the gathered sources with lightningcss' bundler and
//!    print the result.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use lightningcss::bundler::{Bundler, ResolveResult, SourceProvider};
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use rustc_hash::FxHashMap;

use super::{DiagnosticSink, ImportReader, TransformEngine};
use crate::core::LogicalPath;

#[derive(Debug, Clone, Copy, Default)]
pub struct CssEngine {
    /// Print minified output.
    pub minify: bool,
}

impl CssEngine {
    pub fn new(minify: bool) -> Self {
        Self { minify }
    }
}

impl TransformEngine for CssEngine {
    fn transform(
        &self,
        source: &str,
        location: &LogicalPath,
        imports: &mut ImportReader<'_>,
        diagnostics: &mut DiagnosticSink,
    ) -> Option<String> {
        let sources = gather(source, location, imports, diagnostics);
        if diagnostics.has_errors() {
            return None;
        }
        diagnostics.debug(format!("{}: bundling {} source(s)", location, sources.len()));

        let provider = GatheredSources { sources };
        let mut bundler = Bundler::new(&provider, None, ParserOptions::default());
        let stylesheet = match bundler.bundle(Path::new(location.as_str())) {
            Ok(stylesheet) => stylesheet,
            Err(e) => {
                diagnostics.error(e.to_string());
                return None;
            }
        };

        let printed = stylesheet.to_css(PrinterOptions {
            minify: self.minify,
            ..PrinterOptions::default()
        });
        match printed {
            Ok(result) => Some(result.code),
            Err(e) => {
                diagnostics.error(e.to_string());
                None
            }
        }
    }
}

/// Read the source and everything it transitively imports.
fn gather(
    source: &str,
    location: &LogicalPath,
    imports: &mut ImportReader<'_>,
    diagnostics: &mut DiagnosticSink,
) -> FxHashMap<PathBuf, String> {
    let mut sources = FxHashMap::default();
    sources.insert(source_key(location), source.to_string());

    let mut pending = VecDeque::from([(location.clone(), source.to_string())]);
    while let Some((path, text)) = pending.pop_front() {
        for specifier in import_specifiers(&text, &path, diagnostics) {
            if is_external(&specifier) {
                diagnostics.error(format!(
                    "{path}: external import `{specifier}` cannot be bundled"
                ));
                continue;
            }

            let target = match path.parent().join(&specifier) {
                Ok(target) => target,
                Err(e) => {
                    diagnostics.error(format!("{path}: {e}"));
                    continue;
                }
            };
            let key = source_key(&target);
            if sources.contains_key(&key) {
                continue;
            }

            if !imports.exists(target.as_str()) {
                diagnostics.error(format!("{path}: imported file `{specifier}` not found"));
                continue;
            }
            match imports.read(target.as_str()) {
                Ok(imported) => {
                    sources.insert(key, imported.clone());
                    pending.push_back((target, imported));
                }
                Err(e) => diagnostics.error(format!("{path}: {e}")),
            }
        }
    }

    sources
}

/// Urls of the `@import` rules of one stylesheet.
fn import_specifiers(text: &str, path: &LogicalPath, diagnostics: &mut DiagnosticSink) -> Vec<String> {
    let options = ParserOptions {
        filename: path.to_string(),
        ..ParserOptions::default()
    };
    match StyleSheet::parse(text, options) {
        Ok(stylesheet) => stylesheet
            .rules
            .0
            .iter()
            .filter_map(|rule| match rule {
                CssRule::Import(import) => Some(import.url.to_string()),
                _ => None,
            })
            .collect(),
        Err(e) => {
            diagnostics.error(format!("{path}: {e}"));
            Vec::new()
        }
    }
}

fn is_external(specifier: &str) -> bool {
    specifier.contains("://") || specifier.starts_with("//") || specifier.starts_with("data:")
}

fn source_key(path: &LogicalPath) -> PathBuf {
    PathBuf::from(path.as_str())
}

/// Pre-read sources keyed by logical path, served to the bundler.
struct GatheredSources {
    sources: FxHashMap<PathBuf, String>,
}

#[derive(Debug, thiserror::Error)]
#[error("unresolved import `{0}`")]
struct Unresolved(String);

impl SourceProvider for GatheredSources {
    type Error = Unresolved;

    fn read<'a>(&'a self, file: &Path) -> Result<&'a str, Self::Error> {
        self.sources
            .get(file)
            .map(String::as_str)
            .ok_or_else(|| Unresolved(file.display().to_string()))
    }

    fn resolve(
        &self,
        specifier: &str,
        originating_file: &Path,
    ) -> Result<ResolveResult, Self::Error> {
        originating_file
            .to_str()
            .and_then(|from| LogicalPath::new(from).ok())
            .and_then(|from| from.parent().join(specifier).ok())
            .map(|target| ResolveResult::File(source_key(&target)))
            .ok_or_else(|| Unresolved(specifier.to_string()))
    }
}
