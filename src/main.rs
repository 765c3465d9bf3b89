//! brs-jsdoc: turn annotated BrighterScript / BrightScript files into JSDoc
//! carrier files.
//!
//! Two modes:
//!
//! - **stdin mode**: `brs-jsdoc < main.bs > main.js`
//! - **file mode**: `brs-jsdoc -o build/jsdoc source/*.bs components/`

use anyhow::{Context, Result};
use brs_jsdoc::{before_parse, BeforeParseEvent, Converter, PluginOptions};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "brs-jsdoc",
    version,
    about = "Convert BrighterScript doc comments into JSDoc blocks over stub declarations"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSDoc conf.json; plugin options are read from its `opts` section
    #[arg(short = 'c', long, env = "JSDOC_CONFIG")]
    config: Option<PathBuf>,

    /// File name used for stdin input. Decides the dialect and module name.
    #[arg(long, default_value = "stdin.bs")]
    filename: String,

    /// Do not emit @module blocks or module membership
    #[arg(long)]
    no_module: bool,

    /// Keep markup characters in comments as written
    #[arg(long)]
    no_escape: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brs_jsdoc=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    let mut converter = Converter::new(options);

    if cli.files.is_empty() {
        return stdin_mode(&cli, &mut converter);
    }

    file_mode(&cli, &mut converter)
}

/// Options from the config file, then the command line switches.
fn load_options(cli: &Cli) -> Result<PluginOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let env: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in config: {}", path.display()))?;
            PluginOptions::from_env(&env)
        }
        None => PluginOptions::default(),
    };
    if cli.no_module {
        options.add_module = false;
    }
    if cli.no_escape {
        options.escape_html_characters = false;
    }
    debug!(?options, "plugin options");
    Ok(options)
}

/// stdin mode: convert stdin, write the result to stdout.
fn stdin_mode(cli: &Cli, converter: &mut Converter) -> Result<()> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;

    let mut event = BeforeParseEvent {
        source,
        filename: cli.filename.clone(),
    };
    before_parse(converter, &mut event).with_context(|| format!("failed to parse {}", cli.filename))?;
    print!("{}", event.source);
    Ok(())
}

/// file mode: convert every input into `<output>/<stem>.js`. Files that do
/// not parse are skipped with a warning. Inputs sharing a stem are written
/// under a qualified name instead of overwriting each other.
fn file_mode(cli: &Cli, converter: &mut Converter) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;
    let mut taken = HashSet::new();

    for path in &input_files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut event = BeforeParseEvent {
            source,
            filename: path.to_string_lossy().to_string(),
        };
        if let Err(e) = before_parse(converter, &mut event) {
            eprintln!("warning: skipping {}: {}", path.display(), e);
            continue;
        }

        let name = unique_output_name(path, &mut taken);
        let plain = derive_output_name(path);
        if name != plain {
            eprintln!(
                "warning: {}.js already written this run; writing {} to {}.js",
                plain,
                path.display(),
                name
            );
        }
        let out_path = output_dir.join(format!("{}.js", name));
        fs::write(&out_path, &event.source)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(from = %path.display(), to = %out_path.display(), "converted");
    }

    Ok(())
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["bs", "brs"];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for source files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_supported(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sorted so namespaces and modules are declared in a stable order
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output file name (without extension): "source/main.bs" → "main".
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Output name not yet claimed in this run. A clash is qualified with the
/// parent directory ("components/main.bs" → "components_main"), then numbered.
fn unique_output_name(path: &Path, taken: &mut HashSet<String>) -> String {
    let name = derive_output_name(path);
    if taken.insert(name.clone()) {
        return name;
    }
    let base = match path.parent().and_then(Path::file_name) {
        Some(dir) => format!("{}_{}", dir.to_string_lossy(), name),
        None => name,
    };
    let mut candidate = base.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, n);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_drops_extension() {
        assert_eq!(derive_output_name(Path::new("source/main.bs")), "main");
        assert_eq!(derive_output_name(Path::new("lib.brs")), "lib");
        assert_eq!(derive_output_name(Path::new("game.utils.bs")), "game.utils");
    }

    #[test]
    fn clashing_stems_get_qualified_names() {
        let mut taken = HashSet::new();
        assert_eq!(unique_output_name(Path::new("source/main.bs"), &mut taken), "main");
        assert_eq!(
            unique_output_name(Path::new("components/main.bs"), &mut taken),
            "components_main"
        );
        assert_eq!(
            unique_output_name(Path::new("other/components/main.brs"), &mut taken),
            "components_main_2"
        );
        assert_eq!(unique_output_name(Path::new("lib.brs"), &mut taken), "lib");
    }

    #[test]
    fn supported_extensions() {
        assert!(is_supported(Path::new("a/main.bs")));
        assert!(is_supported(Path::new("a/MAIN.BRS")));
        assert!(!is_supported(Path::new("a/notes.md")));
        assert!(!is_supported(Path::new("Makefile")));
    }

    #[test]
    fn switches_override_defaults() {
        let cli = Cli::parse_from(["brs-jsdoc", "--no-module"]);
        let options = load_options(&cli).unwrap();
        assert!(!options.add_module);
        assert!(options.escape_html_characters);
    }
}
