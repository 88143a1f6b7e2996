//! Line-based slicing of tagged regions out of `metadata.xml` text.

/// Extract the lines from the first line opening `tag` through the first
/// line (at or after it) closing `tag`, inclusive.
///
/// The opening tag may carry attributes (`<longdescription lang="en">`).
/// An empty string is returned when the tag never opens or is never
/// closed; callers treat that as "not specified".
///
/// # Examples
///
/// ```
/// use metainfo::extract_region;
///
/// let doc = "<pkgmetadata>\n<herd>mysql</herd>\n</pkgmetadata>\n";
/// assert_eq!(extract_region(doc, "herd"), "<herd>mysql</herd>");
/// assert_eq!(extract_region(doc, "maintainer"), "");
/// ```
pub fn extract_region(text: &str, tag: &str) -> String {
    let open = format!("<{tag}>");
    let open_with_attrs = format!("<{tag} ");
    let close = format!("</{tag}>");

    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines
        .iter()
        .position(|line| line.contains(&open) || line.contains(&open_with_attrs))
    else {
        return String::new();
    };
    let Some(len) = lines[start..].iter().position(|line| line.contains(&close)) else {
        return String::new();
    };
    lines[start..=start + len].join("\n")
}

/// Extract every line from the first `<flag` opening through the last
/// `</flag>` closing, spanning all flag blocks in one region.
pub fn extract_flag_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|line| line.contains("<flag")) else {
        return String::new();
    };
    match lines.iter().rposition(|line| line.contains("</flag>")) {
        Some(end) if end >= start => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
