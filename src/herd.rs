/// Domain used for herd contact addresses.
pub const HERD_DOMAIN: &str = "gentoo.org";

/// Herds with a contact address that differs from `<herd>@gentoo.org`.
///
/// An empty address means the herd has no public contact.
const KNOWN_HERDS: &[(&str, &str)] = &[
    ("alpha", ""),
    ("amd64", ""),
    ("arm", ""),
    ("hppa", ""),
    ("ia64", ""),
    ("mips", ""),
    ("ppc", ""),
    ("ppc64", ""),
    ("s390", ""),
    ("sh", ""),
    ("sparc", ""),
    ("x86", ""),
    ("no-herd", ""),
    ("apache", "apache-bugs"),
    ("mysql", "mysql-bugs"),
    ("php", "php-bugs"),
    ("postgresql", "pgsql-bugs"),
    ("netmon", "netmon-bugs"),
    ("base-system", "base-system-bugs"),
    ("toolchain", "toolchain-bugs"),
    ("perl", "perl-bugs"),
];

/// Contact annotation for a herd: `(address@gentoo.org)`, or an empty
/// string for herds without a public contact.
///
/// Lookup is case-insensitive. Herds that are not in the table are
/// reachable at `<herd>@gentoo.org`.
pub fn herd_contact(name: &str) -> String {
    let known = KNOWN_HERDS
        .iter()
        .find(|(herd, _)| herd.eq_ignore_ascii_case(name))
        .map(|(_, address)| *address);

    match known {
        Some("") => String::new(),
        Some(address) => format!("({address}@{HERD_DOMAIN})"),
        None => format!("({name}@{HERD_DOMAIN})"),
    }
}

/// Format a herd name followed by a tab and its contact annotation.
///
/// # Examples
///
/// ```
/// use metainfo::annotate_herd;
///
/// assert_eq!(annotate_herd("mysql"), "mysql\t(mysql-bugs@gentoo.org)");
/// assert_eq!(annotate_herd("arm"), "arm\t");
/// assert_eq!(annotate_herd("foo"), "foo\t(foo@gentoo.org)");
/// ```
pub fn annotate_herd(name: &str) -> String {
    format!("{name}\t{}", herd_contact(name))
}

/// Annotate every non-empty line of a (possibly multi-line) herd field.
pub fn annotate_herds(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(annotate_herd)
        .collect::<Vec<_>>()
        .join("\n")
}
