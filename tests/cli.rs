use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const MYSQL_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE pkgmetadata SYSTEM "http://www.gentoo.org/dtd/metadata.dtd">
<pkgmetadata>
<herd>mysql</herd>
<longdescription lang="en">
	MySQL is a fast, multi-threaded, multi-user SQL database server.
</longdescription>
<use>
	<flag name='cluster'>Add support for NDB clustering</flag>
	<flag name='embedded'>Build embedded server (libmysqld)</flag>
</use>
</pkgmetadata>
"#;

const JDK_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pkgmetadata>
<maintainer>
	<email>java@gentoo.org</email>
	<name>Java team</name>
</maintainer>
</pkgmetadata>
"#;

const BINDINGS_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pkgmetadata>
<herd>crypto</herd>
<longdescription lang="en">
	Bindings for the <pkg>dev-libs/openssl</pkg> library used by
	many tools.
</longdescription>
</pkgmetadata>
"#;

fn create_tree() -> TempDir {
    let root = tempdir().unwrap();
    let write = |atom: &str, metadata: Option<&str>| {
        let dir = root.path().join(atom);
        fs::create_dir_all(&dir).unwrap();
        if let Some(metadata) = metadata {
            fs::write(dir.join("metadata.xml"), metadata).unwrap();
        }
    };
    write("dev-db/mysql", Some(MYSQL_METADATA));
    write("virtual/jdk", Some(JDK_METADATA));
    write("dev-python/ssl-bindings", Some(BINDINGS_METADATA));
    write("app-misc/foo", None);
    write("dev-util/foo", None);
    root
}

fn metainfo(root: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("metainfo"));
    cmd.env_remove("NOCOLOR").arg("--portdir").arg(root);
    cmd
}

#[test]
fn test_directory_of_atom() {
    let root = create_tree();
    let expected = format!("{}\n", root.path().join("dev-db").join("mysql").display());
    metainfo(root.path())
        .arg("--directory")
        .arg("dev-db/mysql")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_directory_of_atom_with_trailing_slash() {
    let root = create_tree();
    let expected = format!("{}\n", root.path().join("dev-db").join("mysql").display());
    metainfo(root.path())
        .args(["-d", "dev-db/mysql/"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_directory_virtual_fallback() {
    let root = create_tree();
    let expected = format!("{}\n", root.path().join("virtual").join("jdk").display());
    metainfo(root.path())
        .arg("-d")
        .arg("jdk")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_unknown_package() {
    let root = create_tree();
    metainfo(root.path())
        .arg("zzznotapackage")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("zzznotapackage"));
}

#[test]
fn test_failure_aborts_all_packages() {
    let root = create_tree();
    metainfo(root.path())
        .args(["mysql", "zzznotapackage"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_atom() {
    let root = create_tree();
    metainfo(root.path())
        .args(["-H", "dev-db/nothere"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid atom: dev-db/nothere"));
}

#[test]
fn test_ambiguous_package() {
    let root = create_tree();
    metainfo(root.path())
        .arg("foo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("app-misc/foo dev-util/foo"));
}

#[test]
fn test_herd_raw() {
    let root = create_tree();
    metainfo(root.path())
        .args(["--herd", "mysql"])
        .assert()
        .success()
        .stdout("mysql\n");
}

#[test]
fn test_full_report() {
    let root = create_tree();
    metainfo(root.path())
        .arg("mysql")
        .assert()
        .success()
        .stdout(predicate::str::contains("Package:     dev-db/mysql\n"))
        .stdout(predicate::str::contains(
            "Herd:        mysql\t(mysql-bugs@gentoo.org)\n",
        ))
        .stdout(predicate::str::contains("Maintainer:  None specified\n"))
        .stdout(predicate::str::contains(
            "Description: MySQL is a fast, multi-threaded, multi-user SQL database server.\n",
        ))
        .stdout(predicate::str::contains(
            "USE Flags:   [cluster]\n           2 Add support for NDB clustering\n\n           3 [embedded]\n",
        ));
}

#[test]
fn test_description_keeps_package_reference_inline() {
    let root = create_tree();
    metainfo(root.path())
        .args(["--no-color", "ssl-bindings"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Description: Bindings for the dev-libs/openssl library used by many tools.\n",
        ));
}

#[test]
fn test_full_report_missing_herd() {
    let root = create_tree();
    metainfo(root.path())
        .arg("virtual/jdk")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Herd:        None specified (metadata is incomplete: no herd listed)\n",
        ))
        .stdout(predicate::str::contains(
            "Maintainer:  java@gentoo.org\n           2 Java team\n",
        ));
}

#[test]
fn test_full_report_without_metadata_file() {
    let root = create_tree();
    metainfo(root.path())
        .arg("app-misc/foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Description: None specified\n"));
}

#[test]
fn test_multiple_packages_get_headers() {
    let root = create_tree();
    metainfo(root.path())
        .args(["-H", "-m", "mysql", "jdk"])
        .assert()
        .success()
        .stdout(
            "dev-db/mysql:\nmysql\nNone specified\n\
             virtual/jdk:\nNone specified\njava@gentoo.org\nJava team\n",
        );
}

#[test]
fn test_use_flags_no_color() {
    let root = create_tree();
    metainfo(root.path())
        .args(["-nc", "-u", "dev-db/mysql"])
        .assert()
        .success()
        .stdout(
            "[cluster]\nAdd support for NDB clustering\n\n\
             [embedded]\nBuild embedded server (libmysqld)\n",
        );
}

#[test]
fn test_raw_metadata() {
    let root = create_tree();
    metainfo(root.path())
        .args(["--raw-metadata", "virtual/jdk"])
        .assert()
        .success()
        .stdout(JDK_METADATA);
}

#[test]
fn test_portdir_from_environment() {
    let root = create_tree();
    Command::new(cargo::cargo_bin!("metainfo"))
        .env("PORTDIR", root.path())
        .args(["-l", "mysql"])
        .assert()
        .success()
        .stdout("MySQL is a fast, multi-threaded, multi-user SQL database server.\n");
}

#[test]
fn test_missing_package_argument() {
    let root = create_tree();
    metainfo(root.path())
        .arg("--herd")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_flag() {
    let root = create_tree();
    metainfo(root.path())
        .args(["--bogus", "mysql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_help() {
    Command::new(cargo::cargo_bin!("metainfo"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--use-flags"))
        .stdout(predicate::str::contains("--long-desc"));
}
