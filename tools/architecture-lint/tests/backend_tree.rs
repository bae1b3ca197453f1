//! Lints small on-disk `backend/src` trees.

use std::fs;
use std::path::{Path, PathBuf};

use architecture_lint::{ArchitectureLintError, Violation, lint_backend_sources};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct BackendTree {
    _root: TempDir,
    backend: PathBuf,
}

impl BackendTree {
    fn write(&self, file: &str, contents: &str) -> &Self {
        let path = self.backend.join("src").join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write source file");
        self
    }

    fn lint(&self) -> Result<usize, ArchitectureLintError> {
        lint_backend_sources(&self.backend)
    }
}

#[fixture]
fn tree() -> BackendTree {
    let root = TempDir::new().expect("tempdir");
    let backend = root.path().join("backend");
    let tree = BackendTree {
        _root: root,
        backend,
    };
    tree.write(
        "domain/gig.rs",
        "pub struct GigId(u128); impl GigId { pub fn new(v: u128) -> Self { Self(v) } }",
    )
    .write(
        "inbound/http/gigs.rs",
        "use crate::domain::gig::GigId; fn handler() { let _id = GigId::new(1); }",
    )
    .write(
        "outbound/memory/store.rs",
        "use crate::domain::gig::GigId; pub struct MemoryStore; impl MemoryStore { pub fn insert(&self, _id: GigId) {} }",
    )
    .write("main.rs", "use skillx::outbound::memory::MemoryStore; fn main() {}");
    tree
}

fn violations(result: Result<usize, ArchitectureLintError>) -> Vec<Violation> {
    match result {
        Err(ArchitectureLintError::Violations(violations)) => violations,
        other => panic!("expected violations, got {other:?}"),
    }
}

fn has(violations: &[Violation], file: &str, fragment: &str) -> bool {
    violations
        .iter()
        .any(|v| v.file == Path::new(file) && v.message.contains(fragment))
}

#[rstest]
fn layered_tree_passes_and_counts_layer_files(tree: BackendTree) {
    assert_eq!(tree.lint().expect("clean tree"), 3);
}

#[rstest]
fn every_crossing_is_reported(tree: BackendTree) {
    tree.write(
        "inbound/http/bad.rs",
        "use skillx::outbound::persistence::DieselGigRepository; fn f() {}",
    )
    .write("domain/bad.rs", "use actix_web::HttpResponse; fn f() {}")
    .write("outbound/stats/bad.rs", "use crate::inbound::http::state::HttpState;");

    let found = violations(tree.lint());
    assert_eq!(found.len(), 3, "violations: {found:?}");
    assert!(has(&found, "inbound/http/bad.rs", "crate::outbound"));
    assert!(has(&found, "domain/bad.rs", "external crate `actix_web`"));
    assert!(has(&found, "outbound/stats/bad.rs", "crate::inbound"));
}

#[rstest]
fn unparseable_source_is_a_parse_error(tree: BackendTree) {
    tree.write("domain/broken.rs", "fn (");
    assert!(matches!(tree.lint(), Err(ArchitectureLintError::Parse { .. })));
}
