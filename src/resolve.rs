use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use log::debug;
use portage_atom::Cpn;

use crate::error::{Error, Result};

/// Name of the per-package metadata file.
pub const METADATA_FILE: &str = "metadata.xml";

/// Category searched when a bare name matches no regular category.
pub const VIRTUAL_CATEGORY: &str = "virtual";

/// A package identifier resolved to its directory in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// The identifier as given by the user.
    pub identifier: String,
    /// The package directory, `<root>/<category>/<package>`.
    pub directory: PathBuf,
    /// Path of the package's `metadata.xml`.
    pub metadata_path: PathBuf,
}

impl ResolvedPackage {
    pub fn new(identifier: impl Into<String>, directory: PathBuf) -> Self {
        let metadata_path = directory.join(METADATA_FILE);
        ResolvedPackage {
            identifier: identifier.into(),
            directory,
            metadata_path,
        }
    }

    /// The `category/package` atom derived from the directory.
    ///
    /// Falls back to the original identifier if the directory has fewer
    /// than two components.
    pub fn atom(&self) -> String {
        let package = self.directory.file_name();
        let category = self.directory.parent().and_then(Path::file_name);
        match (category, package) {
            (Some(category), Some(package)) => format!(
                "{}/{}",
                category.to_string_lossy(),
                package.to_string_lossy()
            ),
            _ => self.identifier.clone(),
        }
    }
}

/// A package tree laid out as `<root>/<category>/<package>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTree {
    root: PathBuf,
}

impl PackageTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PackageTree { root: root.into() }
    }

    /// Resolve a bare package name or a `category/package` atom.
    ///
    /// An atom must name an existing directory; one trailing `/` is
    /// accepted. A bare name is searched
    /// in every `*-*` category; if it is in none of them,
    /// `virtual/<name>` is tried.
    pub fn resolve(&self, identifier: &str) -> Result<ResolvedPackage> {
        if identifier.contains('/') {
            self.resolve_atom(identifier)
        } else {
            self.resolve_name(identifier)
        }
    }

    /// Resolve every identifier, in order, stopping at the first failure.
    pub fn resolve_all<I, S>(&self, identifiers: I) -> Result<Vec<ResolvedPackage>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .map(|identifier| self.resolve(identifier.as_ref()))
            .collect()
    }

    fn resolve_atom(&self, atom: &str) -> Result<ResolvedPackage> {
        let trimmed = atom.strip_suffix('/').unwrap_or(atom);
        let cpn = Cpn::parse(trimmed).map_err(|_| Error::InvalidAtom(atom.to_string()))?;
        let directory = self.root.join(&cpn.category).join(&cpn.package);
        debug!("Checking {}", directory.display());
        if !directory.is_dir() {
            return Err(Error::InvalidAtom(atom.to_string()));
        }
        Ok(ResolvedPackage::new(atom, directory))
    }

    fn resolve_name(&self, name: &str) -> Result<ResolvedPackage> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(Error::UnresolvablePackage(name.to_string()));
        }

        let pattern = format!(
            "{}/*-*/{}",
            Pattern::escape(&self.root.to_string_lossy()),
            Pattern::escape(name)
        );
        debug!("Searching {pattern}");
        let matches: Vec<PathBuf> = glob(&pattern)
            .map_err(|e| Error::InvalidPattern(e.to_string()))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_dir())
            .collect();

        match matches.as_slice() {
            [directory] => Ok(ResolvedPackage::new(name, directory.clone())),
            [] => {
                let directory = self.root.join(VIRTUAL_CATEGORY).join(name);
                debug!("No category match, trying {}", directory.display());
                if directory.is_dir() {
                    Ok(ResolvedPackage::new(name, directory))
                } else {
                    Err(Error::UnresolvablePackage(name.to_string()))
                }
            }
            _ => Err(Error::AmbiguousPackage {
                name: name.to_string(),
                candidates: matches
                    .iter()
                    .map(|directory| ResolvedPackage::new(name, directory.clone()).atom())
                    .collect(),
            }),
        }
    }
}
