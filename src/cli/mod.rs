//! Command dispatch.

mod args;

pub use args::{Cli, Commands};

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use assetmark::asset::{ContentDirectory, FsDirectory, StaticAsset, hash_reader};
use assetmark::compiler::Compiler;
use assetmark::config::AssetConfig;
use assetmark::core::LogicalPath;
use assetmark::url::UrlGenerator;
use assetmark::{debug, log};
use rayon::prelude::*;

/// Load config found from `cwd` and apply CLI overrides on top.
pub fn load_config(cli: &Cli, cwd: &Path) -> Result<AssetConfig> {
    let mut config = AssetConfig::load(cwd, &cli.config)
        .with_context(|| format!("Failed to load `{}`", cli.config.display()))?;

    if let Some(root) = &cli.root {
        config.url.content_root = cwd.join(root);
    }
    if let Some(prefix) = &cli.prefix {
        config.url.prefix = prefix.clone();
    }
    if let Some(base) = &cli.base {
        config.url.base = base.clone();
    }
    if cli.no_hash {
        config.url.disable_hash_suffix = true;
    }
    if let Commands::Compile { minify: true, .. } = cli.command {
        config.compile.minify = true;
    }

    config.validate()?;
    debug!("config"; "content root: {}", config.content_root().display());
    Ok(config)
}

/// Run the command, writing its output (urls or css) to `out`.
///
/// Log lines and per-path errors go through the logger to stderr.
pub fn run(cli: &Cli, config: &AssetConfig, out: &mut impl Write) -> Result<()> {
    let urls = config.url_generator();

    match &cli.command {
        Commands::File { paths } => print_urls(out, paths, |p| urls.raw_file_url(p)),
        Commands::Cached { paths } => print_urls(out, paths, |p| urls.cached_file_url(p)),
        Commands::Absolute { paths } => print_urls(out, paths, |p| urls.absolute_path_url(p)),
        Commands::Asset { path } => print_asset_url(out, &urls, config, path),
        Commands::Bundle { url } => {
            writeln!(out, "{}", urls.bundle_url(url.as_str()))?;
            Ok(())
        }
        Commands::Compile { path, json, .. } => {
            compile(out, &config.compiler(), config, path, *json)
        }
    }
}

/// Generate urls in parallel, print them in input order.
fn print_urls<F>(out: &mut impl Write, paths: &[String], make: F) -> Result<()>
where
    F: Fn(&str) -> assetmark::Result<String> + Sync,
{
    let results: Vec<_> = paths.par_iter().map(|p| (p, make(p))).collect();

    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(url) => writeln!(out, "{url}")?,
            Err(e) => {
                failed += 1;
                log!("error"; "{}: {}", path, e);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} path(s) failed", paths.len());
    }
    Ok(())
}

fn print_asset_url(
    out: &mut impl Write,
    urls: &UrlGenerator,
    config: &AssetConfig,
    path: &str,
) -> Result<()> {
    let logical = LogicalPath::new(path)?;
    let content = FsDirectory::new(config.content_root());
    if !content.exists(&logical) {
        bail!("file not found: `{path}`");
    }

    let reader = content
        .open_read(&logical)
        .with_context(|| format!("Failed to open `{path}`"))?;
    let digest = hash_reader(reader).with_context(|| format!("Failed to hash `{path}`"))?;

    writeln!(out, "{}", urls.asset_url(&StaticAsset::new(path, digest)))?;
    Ok(())
}

fn compile(
    out: &mut impl Write,
    compiler: &Compiler,
    config: &AssetConfig,
    path: &str,
    json: bool,
) -> Result<()> {
    let logical = LogicalPath::new(path)?;
    let content = FsDirectory::new(config.content_root());

    let result = compiler
        .compile_file(&content, &logical)
        .with_context(|| format!("Failed to compile `{path}`"))?;

    for import in result.imports() {
        debug!("compile"; "imported {}", import);
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write!(out, "{}", result.output())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetmark::config::CONFIG_FILE;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Project with a config pointing at `public/`.
    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            CONFIG_FILE,
            r#"
[url]
prefix = "static/"
content_root = "public"
base = "https://cdn.example.com/"

[compile]
minify = false
"#,
        );
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::create_dir_all(dir.path().join("other")).unwrap();
        dir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("assetmark").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(dir: &TempDir, args: &[&str]) -> Result<String> {
        let cli = parse(args);
        let config = load_config(&cli, dir.path())?;
        let mut out = Vec::new();
        run(&cli, &config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_config_file_values_without_overrides() {
        let dir = project();
        let config = load_config(&parse(&["compile", "~/site.css"]), dir.path()).unwrap();

        assert_eq!(config.url.prefix, "static/");
        assert_eq!(config.url.base, "https://cdn.example.com/");
        assert!(!config.url.disable_hash_suffix);
        assert!(!config.compile.minify);
        assert_eq!(config.content_root(), dir.path().join("public"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = project();
        let cli = parse(&[
            "--root", "other", "--prefix", "_assets/", "--base", "", "--no-hash",
            "compile", "~/site.css", "--minify",
        ]);
        let config = load_config(&cli, dir.path()).unwrap();

        assert_eq!(config.content_root(), dir.path().join("other"));
        assert_eq!(config.url.prefix, "_assets/");
        assert_eq!(config.url.base, "");
        assert!(config.url.disable_hash_suffix);
        assert!(config.compile.minify);
    }

    #[test]
    fn test_invalid_base_flag_is_rejected() {
        let dir = project();
        let cli = parse(&["--base", "not a url", "bundle", "app"]);
        assert!(load_config(&cli, dir.path()).is_err());
    }

    #[test]
    fn test_file_urls_in_input_order() {
        let dir = project();
        write(&dir, "public/css/site.css", "body {}");
        write(&dir, "public/img/logo.png", "png");

        let out = run_to_string(
            &dir,
            &["--no-hash", "--base", "", "file", "~/css/site.css", "~/img/logo.png"],
        )
        .unwrap();
        assert_eq!(out, "static/file/css/site.css\nstatic/file/img/logo.png\n");
    }

    #[test]
    fn test_failed_paths_stay_out_of_output() {
        let dir = project();
        write(&dir, "public/a.css", "a {}");
        let cli = parse(&["--no-hash", "cached", "~/a.css", "a.css"]);
        let config = load_config(&cli, dir.path()).unwrap();

        let mut out = Vec::new();
        let err = run(&cli, &config, &mut out).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://cdn.example.com/static/cached/a.css\n"
        );
    }

    #[test]
    fn test_compile_prints_only_css() {
        let dir = project();
        write(&dir, "public/site.css", "@import \"reset.css\";\nmain { display: block }");
        write(&dir, "public/reset.css", "body { margin: 0 }");

        let out = run_to_string(&dir, &["compile", "~/site.css", "--minify"]).unwrap();
        assert_eq!(out, "body{margin:0}main{display:block}");
    }

    #[test]
    fn test_compile_json_lists_imports() {
        let dir = project();
        write(&dir, "public/site.css", "@import \"reset.css\";");
        write(&dir, "public/reset.css", "body { margin: 0 }");

        let out = run_to_string(&dir, &["compile", "~/site.css", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["imports"], serde_json::json!(["~/reset.css"]));
        assert!(value["output"].as_str().unwrap().contains("margin: 0"));
    }

    #[test]
    fn test_default_config_name() {
        let cli = parse(&["bundle", "app"]);
        assert_eq!(cli.config, Path::new(CONFIG_FILE));
    }
}
