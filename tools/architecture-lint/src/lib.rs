//! Module boundary lint for the SkillX backend.
//!
//! The `skillx` crate is laid out as ports and adapters: `domain` owns the
//! entities, services and port traits; `inbound` drives them over HTTP;
//! `outbound` implements the driven ports for PostgreSQL, memory and stats
//! delivery. This lint parses every file under those three directories and
//! rejects:
//!
//! - `domain` paths into adapters, the trace middleware, startup seeding, or
//!   any web, database or OpenAPI crate
//! - `inbound` paths into `outbound` or the Diesel stack
//! - `outbound` paths into `inbound` or the web and OpenAPI crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the linted crate, as used in absolute paths.
const CRATE_NAME: &str = "skillx";

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Why a lint run did not pass.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// A source directory or file could not be read.
    Io(io::Error),
    /// A file is outside the known layers or is not valid Rust.
    Parse { file: PathBuf, message: String },
    /// At least one layer reaches somewhere it must not.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reading backend sources failed: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} module boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Io(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn parse_error(file: &Path, message: impl fmt::Display) -> ArchitectureLintError {
    ArchitectureLintError::Parse {
        file: file.to_path_buf(),
        message: message.to_string(),
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// Rust source text.
    pub contents: String,
}

/// Module roots and external crates one layer must not reference.
struct Boundary {
    layer: &'static str,
    modules: &'static [&'static str],
    crates: &'static [&'static str],
}

const BOUNDARIES: [Boundary; 3] = [
    Boundary {
        layer: "domain",
        modules: &["doc", "example_data", "inbound", "middleware", "outbound"],
        crates: &[
            "actix_service",
            "actix_web",
            "actix_web_prom",
            "bb8",
            "diesel",
            "diesel_async",
            "diesel_migrations",
            "example_data",
            "prometheus",
            "utoipa",
            "utoipa_swagger_ui",
        ],
    },
    Boundary {
        layer: "inbound",
        modules: &["example_data", "outbound"],
        crates: &["bb8", "diesel", "diesel_async", "diesel_migrations"],
    },
    Boundary {
        layer: "outbound",
        modules: &["inbound", "middleware"],
        crates: &[
            "actix_service",
            "actix_web",
            "actix_web_prom",
            "utoipa",
            "utoipa_swagger_ui",
        ],
    },
];

impl Boundary {
    fn bars_module(&self, root: &str) -> bool {
        self.modules.iter().any(|module| *module == root)
    }

    fn bars_crate(&self, root: &str) -> bool {
        self.crates.iter().any(|name| *name == root)
    }
}

fn boundary_for(file: &Path) -> Option<&'static Boundary> {
    let top = file.components().next()?.as_os_str().to_str()?;
    BOUNDARIES.iter().find(|boundary| boundary.layer == top)
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
/// Returns how many files were checked.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<usize, ArchitectureLintError> {
    let sources = read_layer_sources(&backend_dir.join("src"))?;
    lint_sources(&sources)?;
    Ok(sources.len())
}

/// Lint in-memory sources whose paths are relative to `backend/src`.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        if is_test_support(&source.file) {
            continue;
        }
        let boundary = boundary_for(&source.file).ok_or_else(|| {
            parse_error(&source.file, "not under domain/, inbound/ or outbound/")
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| parse_error(&source.file, err))?;
        violations.extend(violations_in(&source.file, boundary, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Where a referenced path leads.
enum Target<'a> {
    /// A top-level module of the linted crate.
    Module(&'a str),
    /// Another crate.
    Crate(&'a str),
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn classify(segments: &[String]) -> Option<Target<'_>> {
    let mut rest = segments.iter().map(String::as_str);
    let first = rest.next()?;
    match first {
        _ if is_relative(first) => rest.find(|segment| !is_relative(segment)).map(Target::Module),
        CRATE_NAME => rest.next().map(Target::Module),
        "domain" | "inbound" | "outbound" => Some(Target::Module(first)),
        other => Some(Target::Crate(other)),
    }
}

fn violations_in(file: &Path, boundary: &Boundary, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let layer = boundary.layer;
    let messages: BTreeSet<String> = collector
        .paths
        .iter()
        .filter_map(|segments| match classify(segments)? {
            Target::Module(root) if boundary.bars_module(root) => {
                Some(format!("{layer} module must not depend on crate::{root}"))
            }
            Target::Crate(root) if boundary.bars_crate(root) => Some(format!(
                "{layer} module must not depend on external crate `{root}`"
            )),
            Target::Module(_) | Target::Crate(_) => None,
        })
        .collect();

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

/// Every path and `use` leaf referenced outside `cfg(test)` modules.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        let leaf = match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use(&path.tree, prefix);
                prefix.pop();
                return;
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use(item, prefix);
                }
                return;
            }
            syn::UseTree::Name(name) => name.ident.to_string(),
            syn::UseTree::Rename(rename) => rename.ident.to_string(),
            syn::UseTree::Glob(_) => "*".to_owned(),
        };
        let mut path = prefix.clone();
        path.push(leaf);
        self.paths.insert(path);
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if !is_cfg_test(&node.attrs) {
            syn::visit::visit_item_mod(self, node);
        }
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use(&node.tree, &mut Vec::new());
    }
}

/// Test fixtures may wire real adapters, so `#[cfg(test)]` modules are skipped.
fn is_cfg_test(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

fn is_test_support(file: &Path) -> bool {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| matches!(stem, "tests" | "test_utils") || stem.ends_with("_tests"))
}

/// Every `.rs` file below the layer directories, sorted by path.
fn read_layer_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut pending: Vec<PathBuf> = BOUNDARIES
        .iter()
        .map(|boundary| src_dir.join(boundary.layer))
        .filter(|dir| dir.is_dir())
        .collect();
    let mut sources = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let file = path
                    .strip_prefix(src_dir)
                    .map_err(|err| parse_error(&path, err))?
                    .to_path_buf();
                sources.push(LintSource {
                    contents: fs::read_to_string(&path)?,
                    file,
                });
            }
        }
    }

    sources.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(sources)
}
