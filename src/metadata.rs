use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::warn;

use crate::error::{Error, Result};
use crate::extract::{extract_flag_blocks, extract_region};
use crate::markup::{render_use_flags, strip_markup};
use crate::palette::Palette;

/// A human-readable field of `metadata.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `<herd>`: the team responsible for the package.
    Herd,
    /// `<maintainer>`: email, name and role of the first maintainer.
    Maintainer,
    /// `<longdescription>`: a prose description of the package.
    Description,
    /// `<flag>` blocks: per-package USE flag documentation.
    UseFlags,
}

impl Field {
    /// All fields, in report order.
    pub const ALL: [Field; 4] = [
        Field::Herd,
        Field::Maintainer,
        Field::Description,
        Field::UseFlags,
    ];

    /// Label used in the full report.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Herd => "Herd:",
            Field::Maintainer => "Maintainer:",
            Field::Description => "Description:",
            Field::UseFlags => "USE Flags:",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::Herd => "herd",
            Field::Maintainer => "maintainer",
            Field::Description => "longdescription",
            Field::UseFlags => "flag",
        };
        f.write_str(name)
    }
}

/// The raw text of one package's `metadata.xml`.
///
/// Fields are derived on demand from the text; nothing is cached, so a
/// document can be queried any number of times.
///
/// # Examples
///
/// ```
/// use metainfo::MetadataDocument;
///
/// let doc = MetadataDocument::new("<pkgmetadata>\n<herd>mysql</herd>\n</pkgmetadata>");
/// assert_eq!(doc.herd().unwrap(), "mysql");
/// assert_eq!(doc.maintainer().unwrap(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDocument {
    text: String,
}

impl MetadataDocument {
    pub fn new(text: impl Into<String>) -> Self {
        MetadataDocument { text: text.into() }
    }

    /// Read a metadata file.
    ///
    /// A missing file yields an empty document, whose fields are all
    /// unspecified.
    pub fn read(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(MetadataDocument::new(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{} does not exist", path.display());
                Ok(MetadataDocument::default())
            }
            Err(e) => Err(Error::Io(format!("{}: {e}", path.display()))),
        }
    }

    /// The unprocessed file contents.
    pub fn raw(&self) -> &str {
        &self.text
    }

    /// Herd names, one per line.
    pub fn herd(&self) -> Result<String> {
        strip_markup(&extract_region(&self.text, "herd"), false)
    }

    /// The first maintainer block, one child element per line.
    pub fn maintainer(&self) -> Result<String> {
        strip_markup(&extract_region(&self.text, "maintainer"), false)
    }

    /// The long description, flattened into paragraphs.
    pub fn description(&self) -> Result<String> {
        strip_markup(&extract_region(&self.text, "longdescription"), true)
    }

    /// USE flag documentation, styled with `palette`.
    pub fn use_flags(&self, palette: &Palette) -> Result<String> {
        render_use_flags(&extract_flag_blocks(&self.text), palette)
    }

    /// Derive any field by kind.
    pub fn field(&self, field: Field, palette: &Palette) -> Result<String> {
        match field {
            Field::Herd => self.herd(),
            Field::Maintainer => self.maintainer(),
            Field::Description => self.description(),
            Field::UseFlags => self.use_flags(palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYSQL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE pkgmetadata SYSTEM "http://www.gentoo.org/dtd/metadata.dtd">
<pkgmetadata>
<herd>mysql</herd>
<maintainer>
	<email>robbat2@gentoo.org</email>
	<name>Robin H. Johnson</name>
	<description>Primary maintainer</description>
</maintainer>
<longdescription lang="en">
	MySQL&#xae; is a fast, multi-threaded, multi-user
	SQL database server &amp; client library.
</longdescription>
<use>
	<flag name='cluster'>Add support for NDB clustering</flag>
	<flag name='embedded'>
		Build embedded server (libmysqld)
	</flag>
	<flag name="ssl" restrict="&gt;=dev-db/mysql-5">Use <pkg>dev-libs/openssl</pkg></flag>
</use>
</pkgmetadata>
"#;

    #[test]
    fn herd() {
        assert_eq!(MetadataDocument::new(MYSQL).herd().unwrap(), "mysql");
    }

    #[test]
    fn maintainer() {
        assert_eq!(
            MetadataDocument::new(MYSQL).maintainer().unwrap(),
            "robbat2@gentoo.org\nRobin H. Johnson\nPrimary maintainer"
        );
    }

    #[test]
    fn description() {
        assert_eq!(
            MetadataDocument::new(MYSQL).description().unwrap(),
            "MySQL(r) is a fast, multi-threaded, multi-user SQL database server & client library."
        );
    }

    #[test]
    fn use_flags() {
        assert_eq!(
            MetadataDocument::new(MYSQL)
                .use_flags(&Palette::plain())
                .unwrap(),
            "[cluster]\nAdd support for NDB clustering\n\n\
             [embedded]\nBuild embedded server (libmysqld)\n\n\
             [ssl] (>=dev-db/mysql-5 only)\nUse dev-libs/openssl"
        );
    }

    #[test]
    fn field_dispatch() {
        let doc = MetadataDocument::new(MYSQL);
        let palette = Palette::plain();
        for field in Field::ALL {
            let expected = match field {
                Field::Herd => doc.herd(),
                Field::Maintainer => doc.maintainer(),
                Field::Description => doc.description(),
                Field::UseFlags => doc.use_flags(&palette),
            };
            assert_eq!(doc.field(field, &palette), expected, "{field}");
        }
    }

    #[test]
    fn empty_document() {
        let doc = MetadataDocument::default();
        let palette = Palette::plain();
        for field in Field::ALL {
            assert_eq!(doc.field(field, &palette).unwrap(), "", "{field}");
        }
    }

    #[test]
    fn herd_only_document() {
        let doc = MetadataDocument::new("<pkgmetadata>\n<herd>sparc</herd>\n</pkgmetadata>\n");
        assert_eq!(doc.herd().unwrap(), "sparc");
        assert_eq!(doc.maintainer().unwrap(), "");
        assert_eq!(doc.use_flags(&Palette::plain()).unwrap(), "");
    }

    #[test]
    fn read_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.xml");
        fs::write(&path, MYSQL).unwrap();
        let doc = MetadataDocument::read(&path).unwrap();
        assert_eq!(doc.raw(), MYSQL);
    }

    #[test]
    fn read_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = MetadataDocument::read(&dir.path().join("metadata.xml")).unwrap();
        assert_eq!(doc, MetadataDocument::default());
    }

    #[test]
    fn read_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            MetadataDocument::read(dir.path()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn labels() {
        assert_eq!(Field::Description.label(), "Description:");
        assert_eq!(Field::UseFlags.to_string(), "flag");
    }
}
