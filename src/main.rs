use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use metainfo::config::Settings;
use metainfo::{Field, MetadataDocument, PackageTree, Palette, Reporter, Selection};

/// metainfo - show what a package's metadata.xml says about it
///
/// Prints the herd, maintainer, long description and USE flag
/// documentation of Gentoo packages. Packages are given either as a bare
/// name, searched in every category and then in virtual/, or as a
/// category/package atom.
///
/// Without field options a full report is printed. Field options select
/// individual fields, printed without labels so they can be used in
/// scripts.
///
/// Examples:
///   metainfo mysql              # Full report for dev-db/mysql
///   metainfo -H -m dev-db/mysql # Herd and maintainer only
///   metainfo -d jdk             # Directory of virtual/jdk
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Package names or category/package atoms
    #[arg(value_name = "PACKAGE", required = true)]
    packages: Vec<String>,

    /// Print the package directory
    #[arg(short = 'd', long)]
    directory: bool,

    /// Print the herd
    #[arg(short = 'H', long)]
    herd: bool,

    /// Print the long description
    #[arg(short = 'l', long = "long-desc")]
    long_desc: bool,

    /// Print the maintainer
    #[arg(short = 'm', long)]
    maintainer: bool,

    /// Disable colored output (also -nc)
    #[arg(long = "no-color")]
    no_color: bool,

    /// Print metadata.xml without any processing
    #[arg(short = 'r', long = "raw-metadata")]
    raw_metadata: bool,

    /// Print USE flag documentation
    #[arg(short = 'u', long = "use-flags")]
    use_flags: bool,

    /// Package tree root (defaults to portageq's PORTDIR, then /usr/portage)
    #[arg(long, env = "PORTDIR", value_name = "PATH")]
    portdir: Option<PathBuf>,
}

impl Cli {
    /// Items requested with field options, in output order.
    fn selection(&self) -> Vec<Selection> {
        [
            (self.directory, Selection::Directory),
            (self.herd, Selection::Field(Field::Herd)),
            (self.maintainer, Selection::Field(Field::Maintainer)),
            (self.long_desc, Selection::Field(Field::Description)),
            (self.use_flags, Selection::Field(Field::UseFlags)),
            (self.raw_metadata, Selection::RawMetadata),
        ]
        .into_iter()
        .filter_map(|(wanted, item)| wanted.then_some(item))
        .collect()
    }
}

/// Map the two-letter `-nc` short option onto `--no-color`.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-nc" {
                OsString::from("--no-color")
            } else {
                arg
            }
        })
        .collect()
}

fn run(cli: &Cli, settings: &Settings) -> metainfo::Result<()> {
    let tree = PackageTree::new(&settings.portdir);
    let packages = tree.resolve_all(&cli.packages)?;

    let selection = cli.selection();
    let needs_document = selection
        .iter()
        .any(|item| *item != Selection::Directory);
    let mut reporter = Reporter::new(
        io::stdout().lock(),
        settings.width,
        Palette::new(settings.color),
    );

    for (index, package) in packages.iter().enumerate() {
        if selection.is_empty() {
            if index > 0 {
                reporter.blank()?;
            }
            let document = MetadataDocument::read(&package.metadata_path)?;
            reporter.summary(package, &document)?;
            continue;
        }

        if packages.len() > 1 {
            reporter.header(&format!("{}:", package.atom()))?;
        }
        let document = if needs_document {
            MetadataDocument::read(&package.metadata_path)?
        } else {
            MetadataDocument::default()
        };
        reporter.selected(package, &document, &selection)?;
    }

    reporter.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let settings = Settings::detect(cli.portdir.clone(), cli.no_color);
    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("metainfo: {err}");
            eprintln!("Usage: metainfo [OPTIONS] <PACKAGE>...");
            eprintln!("For more information, try '--help'.");
            ExitCode::FAILURE
        }
    }
}
