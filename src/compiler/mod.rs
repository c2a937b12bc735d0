//! Source transform compilation.
//!
//! # Flow
//!
//! ```text
//! source ─► TransformEngine ─► output ─┐
//!              │     ▲                 ├─► CompileResult { output, imports }
//!              ▼     │                 │
//!          DiagnosticSink  ImportReader ┘ (every served path)
//! ```
//!
//! A compile with any error-level diagnostic fails as a whole.

mod css;
mod diagnostic;
mod engine;
mod resolve;

pub use css::CssEngine;
pub use diagnostic::{Diagnostic, DiagnosticSink, Level};
pub use engine::TransformEngine;
pub use resolve::ImportReader;

use serde::Serialize;

use crate::asset::ContentDirectory;
use crate::core::LogicalPath;
use crate::debug;
use crate::error::{Error, Result};

/// Where a source lives and how its imports are read.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub source_path: &'a LogicalPath,
    pub directory: &'a dyn ContentDirectory,
}

/// Compiled output plus the sources it was built from.
///
/// A change to any path in `imports` invalidates `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileResult {
    output: String,
    imports: Vec<LogicalPath>,
}

impl CompileResult {
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn imports(&self) -> &[LogicalPath] {
        &self.imports
    }

    pub fn into_parts(self) -> (String, Vec<LogicalPath>) {
        (self.output, self.imports)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Compiler<E = CssEngine> {
    engine: E,
}

impl Compiler<CssEngine> {
    /// Stylesheet compiler backed by lightningcss.
    pub fn css(minify: bool) -> Self {
        Self::new(CssEngine::new(minify))
    }
}

impl<E: TransformEngine> Compiler<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Compile `source` located at `context.source_path`.
    pub fn compile(&self, source: &str, context: &CompileContext<'_>) -> Result<CompileResult> {
        let mut imports = ImportReader::new(context.directory, context.source_path);
        let mut diagnostics = DiagnosticSink::new();

        let output = self
            .engine
            .transform(source, context.source_path, &mut imports, &mut diagnostics);

        if let Some(message) = diagnostics.error_message() {
            return Err(Error::Compile(message));
        }
        let output = output.ok_or_else(|| {
            Error::Compile(format!("{}: transform produced no output", context.source_path))
        })?;

        let imports = imports.into_imports();
        debug!(
            "compile";
            "{} ({} bytes, {} import(s), {} warning(s))",
            context.source_path,
            output.len(),
            imports.len(),
            diagnostics.count(Level::Warn)
        );
        Ok(CompileResult { output, imports })
    }

    /// Read `path` from `directory` and compile it.
    pub fn compile_file(
        &self,
        directory: &dyn ContentDirectory,
        path: &LogicalPath,
    ) -> Result<CompileResult> {
        if !directory.exists(path) {
            return Err(Error::NotFound {
                path: path.to_string(),
            });
        }
        let source = directory
            .read_to_string(path)
            .map_err(|e| Error::io(path.as_str(), e))?;
        self.compile(
            &source,
            &CompileContext {
                source_path: path,
                directory,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::FsDirectory;
    use std::fs;
    use tempfile::TempDir;

    /// Engine replaying a fixed script of diagnostics and import reads.
    struct Scripted {
        reads: Vec<&'static str>,
        diagnostics: Vec<(Level, &'static str)>,
        output: Option<&'static str>,
    }

    impl TransformEngine for Scripted {
        fn transform(
            &self,
            _source: &str,
            _location: &LogicalPath,
            imports: &mut ImportReader<'_>,
            diagnostics: &mut DiagnosticSink,
        ) -> Option<String> {
            for name in &self.reads {
                if let Err(e) = imports.read(name) {
                    diagnostics.error(e.to_string());
                }
            }
            for (level, message) in &self.diagnostics {
                diagnostics.push(*level, *message);
            }
            self.output.map(String::from)
        }
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), "@import \"vars.css\";\na { color: red }").unwrap();
        fs::write(dir.path().join("css/vars.css"), ":root { --brand: blue }").unwrap();
        dir
    }

    #[test]
    fn test_errors_fail_whole_compile() {
        let dir = fixture();
        let content = FsDirectory::new(dir.path());
        let path = LogicalPath::new("~/css/site.css").unwrap();
        let compiler = Compiler::new(Scripted {
            reads: vec![],
            diagnostics: vec![
                (Level::Info, "starting"),
                (Level::Error, " first problem \n"),
                (Level::Warn, "odd but fine"),
                (Level::Error, "second problem"),
            ],
            output: Some("partial"),
        });

        let err = compiler
            .compile("a {}", &CompileContext { source_path: &path, directory: &content })
            .unwrap_err();
        match err {
            Error::Compile(message) => assert_eq!(message, "first problem\nsecond problem"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let dir = fixture();
        let content = FsDirectory::new(dir.path());
        let path = LogicalPath::new("~/css/site.css").unwrap();
        let compiler = Compiler::new(Scripted {
            reads: vec!["vars.css"],
            diagnostics: vec![(Level::Warn, "deprecated"), (Level::Debug, "noise")],
            output: Some("out"),
        });

        let result = compiler
            .compile("a {}", &CompileContext { source_path: &path, directory: &content })
            .unwrap();
        assert_eq!(result.output(), "out");
        assert_eq!(result.imports()[0].as_str(), "~/css/vars.css");
    }

    #[test]
    fn test_missing_output_without_errors_fails() {
        let dir = fixture();
        let content = FsDirectory::new(dir.path());
        let path = LogicalPath::new("~/css/site.css").unwrap();
        let compiler = Compiler::new(Scripted {
            reads: vec![],
            diagnostics: vec![],
            output: None,
        });

        assert!(matches!(
            compiler.compile("a {}", &CompileContext { source_path: &path, directory: &content }),
            Err(Error::Compile(_))
        ));
    }

    #[test]
    fn test_css_compile_file() {
        let dir = fixture();
        let content = FsDirectory::new(dir.path());
        let path = LogicalPath::new("~/css/site.css").unwrap();

        let result = Compiler::css(false).compile_file(&content, &path).unwrap();
        assert!(!result.output().is_empty());
        assert!(result.output().contains("--brand: blue"));

        let (_, imports) = result.into_parts();
        assert_eq!(imports, [LogicalPath::new("~/css/vars.css").unwrap()]);
    }

    #[test]
    fn test_compile_file_missing() {
        let dir = fixture();
        let content = FsDirectory::new(dir.path());
        let path = LogicalPath::new("~/css/nope.css").unwrap();
        assert!(matches!(
            Compiler::css(false).compile_file(&content, &path),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_concurrent_compiles_are_isolated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.css"), "a { color: red }").unwrap();
        fs::write(dir.path().join("bad.css"), "@import \"missing.css\";").unwrap();
        let content = FsDirectory::new(dir.path());
        let compiler = Compiler::css(true);

        std::thread::scope(|s| {
            let good = s.spawn(|| {
                let path = LogicalPath::new("~/good.css").unwrap();
                compiler.compile_file(&content, &path)
            });
            let bad = s.spawn(|| {
                let path = LogicalPath::new("~/bad.css").unwrap();
                compiler.compile_file(&content, &path)
            });
            assert_eq!(good.join().unwrap().unwrap().output(), "a{color:red}");
            assert!(matches!(bad.join().unwrap(), Err(Error::Compile(_))));
        });
    }

    #[test]
    fn test_result_serializes() {
        let result = CompileResult {
            output: "a{}".into(),
            imports: vec![LogicalPath::new("~/b.css").unwrap()],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"output":"a{}","imports":["~/b.css"]}"#);
    }
}
