use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_until, take_while};

use crate::entity::decode_entities;
use crate::error::{Error, Result};
use crate::palette::Palette;

/// A lexical unit of `metadata.xml` text.
///
/// Only the shape of the markup is recognized; nesting is not checked and
/// attribute values are kept raw (entities are not decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'s> {
    /// `<name attr='value' ...>` or `<name/>`.
    Open {
        /// Tag name.
        name: &'s str,
        /// Attributes in source order, quotes removed.
        attrs: Vec<(&'s str, &'s str)>,
    },
    /// `</name>`.
    Close(&'s str),
    /// Character data between tags, including any stray `<`.
    Text(&'s str),
    /// Comments, processing instructions and declarations.
    Other(&'s str),
}

impl<'s> Token<'s> {
    /// Split `input` into tokens.
    ///
    /// Every input is tokenizable: anything that does not form a tag is
    /// returned as text.
    ///
    /// # Examples
    ///
    /// ```
    /// use metainfo::Token;
    ///
    /// let tokens = Token::tokenize("<flag name='ssl'>TLS</flag>").unwrap();
    /// assert_eq!(
    ///     tokens,
    ///     vec![
    ///         Token::Open { name: "flag", attrs: vec![("name", "ssl")] },
    ///         Token::Text("TLS"),
    ///         Token::Close("flag"),
    ///     ]
    /// );
    /// ```
    pub fn tokenize(input: &'s str) -> Result<Vec<Token<'s>>> {
        parse_tokens
            .parse(input)
            .map_err(|e| Error::Markup(format!("{e}")))
    }

    /// Look up an attribute of an opening tag.
    pub fn attr(&self, key: &str) -> Option<&'s str> {
        match self {
            Token::Open { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| *value),
            _ => None,
        }
    }
}

/// Remove markup from an extracted region, leaving one logical record per
/// line.
///
/// Opening tags are dropped and closing tags end the current line, except
/// for inline `<pkg>` and `<cat>` references, which stay in the text. With
/// `flatten`, newlines inside character data are joined into spaces first,
/// so a wrapped paragraph becomes a single line. Lines are normalized
/// (leading whitespace removed, whitespace runs collapsed) and empty
/// lines are dropped.
///
/// # Examples
///
/// ```
/// use metainfo::strip_markup;
///
/// let region = "<maintainer>\n  <email>dev@gentoo.org</email>\n  <name>A   Dev</name>\n</maintainer>";
/// assert_eq!(strip_markup(region, false).unwrap(), "dev@gentoo.org\nA Dev");
/// ```
pub fn strip_markup(text: &str, flatten: bool) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    for token in Token::tokenize(text)? {
        match token {
            Token::Open { .. } | Token::Other(_) | Token::Close("pkg" | "cat") => {}
            Token::Close(_) => out.push('\n'),
            Token::Text(data) => push_text(&mut out, data, flatten, |s| s.to_string()),
        }
    }

    Ok(out
        .lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Package,
    Category,
}

/// Render a region of `<flag>` blocks as display text.
///
/// Each flag becomes a `[name]` label line, followed by an optional
/// `(restriction only)` note, its description, and a blank line.
/// `<pkg>` and `<cat>` references are styled with `palette`; any other
/// tag is dropped.
///
/// # Examples
///
/// ```
/// use metainfo::{render_use_flags, Palette};
///
/// let region = "<flag name='ssl'>Use <pkg>dev-libs/openssl</pkg></flag>\n\
///               <flag name='gd' restrict='&gt;=dev-lang/php-5'>Image support</flag>";
/// assert_eq!(
///     render_use_flags(region, &Palette::plain()).unwrap(),
///     "[ssl]\nUse dev-libs/openssl\n\n[gd] (>=dev-lang/php-5 only)\nImage support"
/// );
/// ```
pub fn render_use_flags(text: &str, palette: &Palette) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut span = None;

    for token in Token::tokenize(text)? {
        match token {
            Token::Open { name: "flag", .. } => {
                if let Some(flag) = token.attr("name") {
                    out.push_str(&palette.flag(&format!("[{}]", decode_entities(flag))));
                }
                if let Some(restrict) = token.attr("restrict") {
                    out.push(' ');
                    out.push_str(
                        &palette.restrict(&format!("({} only)", decode_entities(restrict))),
                    );
                }
                out.push('\n');
            }
            Token::Close("flag") => out.push_str("\n\n"),
            Token::Open { name: "pkg", .. } => span = Some(Span::Package),
            Token::Open { name: "cat", .. } => span = Some(Span::Category),
            Token::Close("pkg" | "cat") => span = None,
            Token::Open { .. } | Token::Close(_) | Token::Other(_) => {}
            Token::Text(data) => match span {
                Some(Span::Package) => push_text(&mut out, data, true, |s| palette.package(s)),
                Some(Span::Category) => push_text(&mut out, data, true, |s| palette.category(s)),
                None => push_text(&mut out, data, true, |s| s.to_string()),
            },
        }
    }

    Ok(join_paragraphs(out.lines().map(normalize_line)))
}

fn push_text(out: &mut String, data: &str, flatten: bool, paint: impl Fn(&str) -> String) {
    let decoded = decode_entities(data);
    if flatten {
        out.push_str(&paint(&decoded.replace(['\r', '\n'], " ")));
    } else {
        out.push_str(&paint(&decoded));
    }
}

/// Drop leading and trailing whitespace and collapse inner runs of two or
/// more whitespace characters into one space.
fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut run = String::new();
    for c in line.trim_start().chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        match run.chars().count() {
            0 => {}
            1 => out.push_str(&run),
            _ => out.push(' '),
        }
        run.clear();
        out.push(c);
    }
    out
}

/// Join lines, keeping at most one blank line between paragraphs and none
/// at either end.
fn join_paragraphs(lines: impl Iterator<Item = String>) -> String {
    let mut kept: Vec<String> = Vec::new();
    for line in lines {
        if line.is_empty() && kept.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|last| last.is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

// Winnow parsers

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

fn parse_name<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., is_name_char).parse_next(input)
}

fn parse_comment<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    delimited("<!--", take_until(0.., "-->"), "-->")
        .take()
        .map(Token::Other)
        .parse_next(input)
}

fn parse_processing_instruction<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    delimited("<?", take_until(0.., "?>"), "?>")
        .take()
        .map(Token::Other)
        .parse_next(input)
}

fn parse_declaration<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    (
        "<!",
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_till(0.., |c: char| c == '>' || c == '<'),
        '>',
    )
        .take()
        .map(Token::Other)
        .parse_next(input)
}

fn parse_close_tag<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    delimited("</", parse_name, (multispace0, '>'))
        .map(Token::Close)
        .parse_next(input)
}

fn parse_attribute_value<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
        take_till(1.., |c: char| c.is_whitespace() || c == '>'),
    ))
    .parse_next(input)
}

fn parse_attribute<'s>(input: &mut &'s str) -> ModalResult<(&'s str, &'s str)> {
    multispace1.parse_next(input)?;
    let key = parse_name.parse_next(input)?;
    let value = opt(preceded(
        (multispace0, '=', multispace0),
        parse_attribute_value,
    ))
    .parse_next(input)?;
    Ok((key, value.unwrap_or("")))
}

fn parse_open_tag<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    '<'.parse_next(input)?;
    let name = parse_name.parse_next(input)?;
    let attrs: Vec<(&'s str, &'s str)> = repeat(0.., parse_attribute).parse_next(input)?;
    (multispace0, opt('/'), '>').parse_next(input)?;
    Ok(Token::Open { name, attrs })
}

fn parse_text<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    take_till(1.., '<').map(Token::Text).parse_next(input)
}

fn parse_stray_lt<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    "<".map(Token::Text).parse_next(input)
}

fn parse_token<'s>(input: &mut &'s str) -> ModalResult<Token<'s>> {
    alt((
        parse_comment,
        parse_processing_instruction,
        parse_declaration,
        parse_close_tag,
        parse_open_tag,
        parse_text,
        parse_stray_lt,
    ))
    .parse_next(input)
}

fn parse_tokens<'s>(input: &mut &'s str) -> ModalResult<Vec<Token<'s>>> {
    repeat(0.., parse_token).parse_next(input)
}
