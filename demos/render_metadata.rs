use std::path::PathBuf;

use metainfo::report::body_width;
use metainfo::{MetadataDocument, Palette, Reporter, ResolvedPackage, Token};

const EXAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE pkgmetadata SYSTEM "http://www.gentoo.org/dtd/metadata.dtd">
<pkgmetadata>
<herd>php</herd>
<maintainer>
	<email>php-bugs@gentoo.org</email>
	<name>PHP team</name>
</maintainer>
<longdescription lang="en">
	PHP is a widely-used general-purpose scripting language that is
	especially suited for Web development and can be embedded into HTML.
	Bundled extensions are controlled with USE flags; see below.
</longdescription>
<use>
	<flag name='gd'>Adds support for <pkg>media-libs/gd</pkg> image
		manipulation</flag>
	<flag name='mysql' restrict="&gt;=dev-lang/php-5.3">Add
		<cat>dev-db</cat> MySQL&#xae; database support</flag>
</use>
</pkgmetadata>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = MetadataDocument::new(EXAMPLE);
    let package = ResolvedPackage::new("php", PathBuf::from("/usr/portage/dev-lang/php"));

    println!("=== Tokens ===");
    for token in Token::tokenize(EXAMPLE)? {
        match token {
            Token::Open { name, attrs } if !attrs.is_empty() => {
                println!("open   {name} {attrs:?}")
            }
            Token::Open { name, .. } => println!("open   {name}"),
            Token::Close(name) => println!("close  {name}"),
            Token::Text(text) if text.trim().is_empty() => {}
            Token::Text(text) => println!("text   {:?}", text.trim()),
            Token::Other(other) => println!("other  {other}"),
        }
    }

    println!("\n=== Report ===");
    let mut reporter = Reporter::new(std::io::stdout().lock(), body_width(None), Palette::new(true));
    reporter.summary(&package, &document)?;
    reporter.flush()?;
    Ok(())
}
