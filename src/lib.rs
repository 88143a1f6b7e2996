//! Human-readable queries over Gentoo `metadata.xml` files.
//!
//! Every package in a Gentoo tree may ship a `metadata.xml` next to its
//! ebuilds, naming the responsible herd, its maintainers, a long
//! description and documentation for package-specific USE flags. This
//! crate finds a package's directory from a bare name or a
//! `category/package` atom, pulls those fields out of the file and renders
//! them for a terminal.
//!
//! The parser is deliberately forgiving: it slices known regions out of
//! the text line by line and tokenizes the markup without validating it,
//! so files that do not follow the DTD still produce useful output.
//!
//! # Examples
//!
//! Render the fields of a metadata file:
//!
//! ```
//! use metainfo::{annotate_herds, MetadataDocument, Palette};
//!
//! let doc = MetadataDocument::new("\
//! <pkgmetadata>
//! <herd>mysql</herd>
//! <use>
//!   <flag name='embedded'>Build the embedded server</flag>
//! </use>
//! </pkgmetadata>
//! ");
//! assert_eq!(annotate_herds(&doc.herd().unwrap()), "mysql\t(mysql-bugs@gentoo.org)");
//! assert_eq!(
//!     doc.use_flags(&Palette::plain()).unwrap(),
//!     "[embedded]\nBuild the embedded server"
//! );
//! ```

pub mod config;
mod entity;
mod error;
mod extract;
mod herd;
mod markup;
mod metadata;
mod palette;
pub mod report;
mod resolve;

// Re-export public types
pub use entity::decode_entities;
pub use error::{Error, Result};
pub use extract::{extract_flag_blocks, extract_region};
pub use herd::{annotate_herd, annotate_herds, herd_contact};
pub use markup::{render_use_flags, strip_markup, Token};
pub use metadata::{Field, MetadataDocument};
pub use palette::Palette;
pub use report::{Reporter, Selection};
pub use resolve::{PackageTree, ResolvedPackage, METADATA_FILE};
