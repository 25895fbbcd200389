//! Layer boundary lint for the gateway crate.
//!
//! Every file under `gateway/src/{domain,inbound,outbound}` belongs to the
//! layer named by its first directory. Each file is parsed with `syn`, paths
//! starting with `crate`, `self`, `super` or `gateway` are resolved to the
//! top-level gateway module they land in, and two tables are checked per
//! layer: the gateway modules it may reach and the external crates it must
//! not name.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use thiserror::Error;

const CRATE_NAME: &str = "gateway";
const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    fn of(file: &Path) -> Option<Self> {
        match file.components().next()?.as_os_str().to_str()? {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    /// Top-level gateway modules the layer may depend on.
    const fn reachable_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["domain"],
            Self::Inbound => &["domain", "inbound", "middleware", "test_support"],
            Self::Outbound => &["domain", "outbound"],
        }
    }

    /// External crates the layer must not name.
    const fn forbidden_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "actix_http",
                "actix_web",
                "async_graphql",
                "async_graphql_actix_web",
                "mockito",
                "ortho_config",
                "reqwest",
                "url",
            ],
            Self::Inbound => &["mockito", "reqwest"],
            Self::Outbound => &[
                "actix_http",
                "actix_web",
                "async_graphql",
                "async_graphql_actix_web",
            ],
        }
    }

    fn permits(self, dependency: &Dependency) -> bool {
        match dependency {
            Dependency::Module(module) => self.reachable_modules().contains(&module.as_str()),
            Dependency::Crate(name) => !self.forbidden_crates().contains(&name.as_str()),
        }
    }
}

/// Target of a path found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dependency {
    /// Top-level module of the gateway crate.
    Module(String),
    /// External crate.
    Crate(String),
}

/// A dependency the file's layer is not allowed to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path relative to `gateway/src`.
    pub file: PathBuf,
    /// Layer the file belongs to.
    pub layer: &'static str,
    pub dependency: Dependency,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.display();
        match &self.dependency {
            Dependency::Module(module) => {
                write!(f, "{file}: {} must not reach crate::{module}", self.layer)
            }
            Dependency::Crate(name) => {
                write!(f, "{file}: {} must not use crate `{name}`", self.layer)
            }
        }
    }
}

/// Errors returned by the lint.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read gateway sources: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {}: {source}", file.display())]
    Parse { file: PathBuf, source: syn::Error },
    #[error("{} does not belong to a gateway layer", .0.display())]
    Unlayered(PathBuf),
    #[error("layer boundary violations:\n{}", render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `gateway/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the layered sources of the `gateway/` directory on disk.
///
/// # Errors
///
/// Returns [`LintError::Violations`] listing every forbidden dependency, or
/// the I/O or parse failure that stopped the run.
pub fn lint_gateway_sources(gateway_dir: &Path) -> Result<(), LintError> {
    let src_dir = gateway_dir.join("src");
    let mut sources = Vec::new();
    for layer in LAYER_DIRS {
        collect_sources(&src_dir, &src_dir.join(layer), &mut sources)?;
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// See [`lint_gateway_sources`].
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer =
            Layer::of(&source.file).ok_or_else(|| LintError::Unlayered(source.file.clone()))?;
        let parsed = syn::parse_file(&source.contents).map_err(|error| LintError::Parse {
            file: source.file.clone(),
            source: error,
        })?;

        let mut collector = PathCollector::default();
        collector.visit_file(&parsed);

        let module = module_path(&source.file);
        let forbidden: BTreeSet<Dependency> = collector
            .paths
            .iter()
            .filter_map(|path| resolve(&module, path))
            .filter(|dependency| !layer.permits(dependency))
            .collect();
        violations.extend(forbidden.into_iter().map(|dependency| Violation {
            file: source.file.clone(),
            layer: layer.name(),
            dependency,
        }));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

/// Module path of a source file: `domain/ports/mod.rs` is `domain::ports`.
fn module_path(file: &Path) -> Vec<String> {
    let mut segments: Vec<String> = file
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    if let Some(last) = segments.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(&last).to_owned();
        if stem != "mod" {
            segments.push(stem);
        }
    }
    segments
}

/// Resolve a path written inside `module` to the dependency it names.
fn resolve(module: &[String], path: &[String]) -> Option<Dependency> {
    let (first, rest) = path.split_first()?;
    match first.as_str() {
        "crate" | CRATE_NAME => rest.first().cloned().map(Dependency::Module),
        "self" | "super" => {
            let mut resolved = module.to_vec();
            let mut remaining = path.iter().peekable();
            while let Some(segment) = remaining.next_if(|segment| {
                matches!(segment.as_str(), "self" | "super")
            }) {
                if segment == "super" {
                    resolved.pop();
                }
            }
            resolved
                .first()
                .or_else(|| remaining.next())
                .cloned()
                .map(Dependency::Module)
        }
        _ => Some(Dependency::Crate(first.clone())),
    }
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                if !prefix.is_empty() {
                    self.paths.insert(prefix);
                }
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        // Single-segment paths are locals, prelude items or imported names.
        if node.segments.len() > 1 {
            self.paths.insert(
                node.segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect(),
            );
        }
        visit::visit_path(self, node);
    }
}

fn collect_sources(
    src_dir: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), LintError> {
    if !dir.is_dir() {
        return Ok(());
    }
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_sources(src_dir, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let Ok(file) = path.strip_prefix(src_dir).map(Path::to_path_buf) else {
                continue;
            };
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
