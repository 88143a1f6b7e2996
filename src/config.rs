//! Runtime settings: where the tree lives, whether to use color, and how
//! wide the output may be.

use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::report::body_width;

/// Tree root used when neither the command line nor `portageq` names one.
pub const DEFAULT_PORTDIR: &str = "/usr/portage";

/// Settings reported by `portageq envvar`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortageEnv {
    /// `PORTDIR`, if set and non-empty.
    pub portdir: Option<PathBuf>,
    /// `NOCOLOR` interpreted as a boolean.
    pub nocolor: bool,
}

impl PortageEnv {
    /// Ask the package manager for `NOCOLOR` and `PORTDIR`.
    ///
    /// Returns the defaults when `portageq` is missing or fails.
    pub fn query() -> Self {
        let output = match Command::new("portageq")
            .args(["envvar", "-v", "NOCOLOR", "PORTDIR"])
            .output()
        {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                debug!("portageq exited with {}", output.status);
                return PortageEnv::default();
            }
            Err(e) => {
                debug!("portageq unavailable: {e}");
                return PortageEnv::default();
            }
        };
        PortageEnv::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse `KEY=VALUE` lines as printed by `portageq envvar -v`.
    ///
    /// Values may be quoted. Unknown keys are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use metainfo::config::PortageEnv;
    ///
    /// let env = PortageEnv::parse("NOCOLOR=\"true\"\nPORTDIR=\"/var/db/repos/gentoo\"\n");
    /// assert!(env.nocolor);
    /// assert_eq!(env.portdir.unwrap().to_str(), Some("/var/db/repos/gentoo"));
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut env = PortageEnv::default();
        for line in input.lines() {
            let line = line.trim();
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim_matches(|c| c == '"' || c == '\'');
                match key {
                    "PORTDIR" if !value.is_empty() => env.portdir = Some(PathBuf::from(value)),
                    "NOCOLOR" => env.nocolor = is_truthy(value),
                    _ => {} // Ignore unknown keys
                }
            }
        }
        env
    }
}

/// Whether a `NOCOLOR`-style value means "yes".
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the package tree.
    pub portdir: PathBuf,
    /// Emit ANSI styling.
    pub color: bool,
    /// Width available to field bodies.
    pub width: usize,
}

impl Settings {
    /// Combine the inputs that decide the settings.
    ///
    /// * `portdir`: explicit tree root, taking precedence over `env`.
    /// * `no_color`: color was disabled by the user (flag or `NOCOLOR`).
    /// * `color_capable`: the output supports styling at all.
    /// * `columns`: terminal width, if known.
    pub fn new(
        portdir: Option<PathBuf>,
        env: &PortageEnv,
        no_color: bool,
        color_capable: bool,
        columns: Option<usize>,
    ) -> Self {
        let portdir = portdir
            .or_else(|| env.portdir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PORTDIR));
        Settings {
            portdir,
            color: color_capable && !no_color && !env.nocolor,
            width: body_width(columns),
        }
    }

    /// Detect settings from the process environment and the terminal.
    ///
    /// `portageq` is only consulted when no explicit tree root is given.
    pub fn detect(portdir: Option<PathBuf>, no_color: bool) -> Self {
        let env = match portdir {
            Some(_) => PortageEnv::default(),
            None => PortageEnv::query(),
        };
        let no_color = no_color || std::env::var("NOCOLOR").is_ok_and(|value| is_truthy(&value));
        let columns = console::Term::stdout()
            .size_checked()
            .map(|(_rows, columns)| usize::from(columns));

        let settings = Settings::new(portdir, &env, no_color, console::colors_enabled(), columns);
        debug!("{settings:?}");
        settings
    }
}
