use std::io::{self, Write};

use console::measure_text_width;

use crate::error::Result;
use crate::herd::annotate_herds;
use crate::metadata::{Field, MetadataDocument};
use crate::palette::Palette;
use crate::resolve::ResolvedPackage;

/// Column at which field bodies start; labels are padded to this width.
pub const LABEL_WIDTH: usize = 13;

/// Terminal width assumed when the real one cannot be determined.
pub const DEFAULT_COLUMNS: usize = 80;

/// Narrowest body width ever used for wrapping.
pub const MIN_WIDTH: usize = 20;

/// Placeholder printed for absent fields.
pub const NONE_SPECIFIED: &str = "None specified";

/// Appended to the placeholder when a package names no herd.
pub const MISSING_HERD_NOTE: &str = " (metadata is incomplete: no herd listed)";

/// A single item printed when specific fields are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The package directory.
    Directory,
    /// One metadata field, unlabelled.
    Field(Field),
    /// The whole `metadata.xml`, unprocessed.
    RawMetadata,
}

/// Width available to a field body on a terminal of `columns` columns.
///
/// # Examples
///
/// ```
/// use metainfo::report::body_width;
///
/// assert_eq!(body_width(None), 67);
/// assert_eq!(body_width(Some(100)), 87);
/// assert_eq!(body_width(Some(10)), 20);
/// ```
pub fn body_width(columns: Option<usize>) -> usize {
    columns
        .unwrap_or(DEFAULT_COLUMNS)
        .saturating_sub(LABEL_WIDTH)
        .max(MIN_WIDTH)
}

/// Wrap `text` to `width` display columns.
///
/// Every input line is wrapped on its own and blank lines are preserved.
/// A line that already fits is kept verbatim. Longer lines are filled
/// greedily on whitespace; words are never split, so a word wider than
/// `width` occupies a line by itself. ANSI escapes do not count towards
/// the width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines() {
        if measure_text_width(line) <= width {
            lines.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0;
        for word in line.split_whitespace() {
            let word_width = measure_text_width(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Writes labelled, wrapped metadata fields.
///
/// A field prints its first line right after the label. Further lines are
/// indented under it, each prefixed with its line number; blank lines are
/// left unnumbered.
pub struct Reporter<W> {
    out: W,
    width: usize,
    palette: Palette,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, width: usize, palette: Palette) -> Self {
        Reporter {
            out,
            width,
            palette,
        }
    }

    /// Write a labelled field.
    ///
    /// An empty `body` prints [`NONE_SPECIFIED`], followed by `note` if
    /// one is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use metainfo::{Palette, Reporter};
    ///
    /// let mut reporter = Reporter::new(Vec::new(), 20, Palette::plain());
    /// reporter
    ///     .field("Description:", "one two three four five six seven", None)
    ///     .unwrap();
    /// reporter.field("Herd:", "", Some(" (incomplete)")).unwrap();
    /// let out = String::from_utf8(reporter.into_inner()).unwrap();
    /// assert_eq!(
    ///     out,
    ///     "Description: one two three four\n           2 five six seven\n\
    ///      Herd:        None specified (incomplete)\n"
    /// );
    /// ```
    pub fn field(&mut self, label: &str, body: &str, note: Option<&str>) -> io::Result<()> {
        let label = self.palette.label(&format!("{label:<LABEL_WIDTH$}"));
        if body.trim().is_empty() {
            return writeln!(self.out, "{label}{NONE_SPECIFIED}{}", note.unwrap_or(""));
        }

        let lines = wrap(body, self.width);
        let mut lines = lines.iter();
        if let Some(first) = lines.next() {
            writeln!(self.out, "{label}{first}")?;
        }
        let mut number = 1;
        for line in lines {
            if line.is_empty() {
                writeln!(self.out)?;
                continue;
            }
            number += 1;
            writeln!(self.out, "{number:>width$} {line}", width = LABEL_WIDTH - 1)?;
        }
        Ok(())
    }

    /// Write `text` as is, or [`NONE_SPECIFIED`] if it is empty.
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        if text.trim().is_empty() {
            writeln!(self.out, "{NONE_SPECIFIED}")
        } else {
            writeln!(self.out, "{}", text.trim_end_matches('\n'))
        }
    }

    /// Write a styled header line such as `dev-db/mysql:`.
    pub fn header(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.label(text))
    }

    /// Write the full labelled report for one package.
    ///
    /// Herds are annotated with their contact address here.
    pub fn summary(
        &mut self,
        package: &ResolvedPackage,
        document: &MetadataDocument,
    ) -> Result<()> {
        self.field("Package:", &package.atom(), None)?;
        self.field(
            Field::Herd.label(),
            &annotate_herds(&document.herd()?),
            Some(MISSING_HERD_NOTE),
        )?;
        self.field(Field::Maintainer.label(), &document.maintainer()?, None)?;
        self.field("Location:", &package.directory.display().to_string(), None)?;
        self.field(Field::Description.label(), &document.description()?, None)?;
        self.field(
            Field::UseFlags.label(),
            &document.use_flags(&self.palette)?,
            None,
        )?;
        Ok(())
    }

    /// Write the selected items for one package, unlabelled, in order.
    pub fn selected(
        &mut self,
        package: &ResolvedPackage,
        document: &MetadataDocument,
        selection: &[Selection],
    ) -> Result<()> {
        for item in selection {
            match item {
                Selection::Directory => self.raw(&package.directory.display().to_string())?,
                Selection::Field(field) => {
                    let text = document.field(*field, &self.palette)?;
                    self.raw(&text)?;
                }
                Selection::RawMetadata => self.raw(document.raw())?,
            }
        }
        Ok(())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
