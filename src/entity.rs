/// Named entities understood in `metadata.xml` text, with their display form.
///
/// Matching is ASCII case-insensitive.
const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&apos;", "'"),
    ("&trade;", "(tm)"),
    ("&copy;", "(c)"),
    ("&#xae;", "(r)"),
];

/// Replace the known named entities in `text` with their literal or
/// terminal-friendly equivalent.
///
/// The input is scanned once from left to right, so the output of a
/// replacement is never decoded again. Unknown entities and stray `&`
/// characters are kept as they are.
///
/// # Examples
///
/// ```
/// use metainfo::decode_entities;
///
/// assert_eq!(decode_entities("Qt&trade; &amp; KDE"), "Qt(tm) & KDE");
/// assert_eq!(decode_entities("&LT;pkg&GT;"), "<pkg>");
/// assert_eq!(decode_entities("&nbsp;"), "&nbsp;");
/// ```
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match lookup(rest) {
            Some((len, replacement)) => {
                out.push_str(replacement);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn lookup(s: &str) -> Option<(usize, &'static str)> {
    ENTITIES
        .iter()
        .find(|(name, _)| {
            s.get(..name.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        })
        .map(|(name, replacement)| (name.len(), *replacement))
}
