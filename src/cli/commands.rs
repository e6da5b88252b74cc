use crate::dispatch::{Invocation, DEFAULT_COMMAND, DEFAULT_TEST_ENTRY};
use crate::util::parse_log_level;
use clap::Parser;
use std::ffi::OsString;
use tracing::Level;

/// Provisions environments, bundles and tests the Sphinx distribution
#[derive(Parser, Debug)]
#[command(
    name = "sphinx-project",
    about = "Provisions environments, bundles and tests the Sphinx distribution",
    version,
    long_about = "Runs the named project operations in order. Every operation checks what \
                  already exists under build/ and only does the missing work.\n\n\
                  Operations: build, test, clean, clean_build, clean_test.\n\
                  Without operations the default pipeline runs: clean, build, test.\n\n\
                  Examples:\n  \
                  sphinx-project\n  \
                  sphinx-project build\n  \
                  sphinx-project clean_test test -te tests/test_core.py::TestCore::test_1\n  \
                  sphinx-project -ll DEBUG clean"
)]
pub struct CliArgs {
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "INFO",
        value_parser = parse_log_level,
        help = "Logging level: DEBUG, INFO, WARNING, ERROR, CRITICAL (short form: -ll)"
    )]
    pub log_level: Level,

    #[arg(
        value_name = "COMMAND",
        default_value = DEFAULT_COMMAND,
        help = "Operations to run in order, or 'default' for clean, build, test"
    )]
    pub commands: Vec<String>,

    #[arg(
        long = "test-entry",
        value_name = "LOCATOR",
        default_value = DEFAULT_TEST_ENTRY,
        help = "Test locator passed to pytest (short form: -te)"
    )]
    pub test_entry: String,
}

impl CliArgs {
    /// Parses arguments, accepting the two-letter `-ll` and `-te` spellings
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    pub fn into_invocation(self) -> Invocation {
        Invocation::new(self.log_level, self.commands, self.test_entry)
    }
}

const LEGACY_FLAGS: [(&str, &str); 2] = [("-ll", "--log-level"), ("-te", "--test-entry")];

/// Rewrites `-ll`/`-te` (and `-ll=VALUE`) to their long forms
///
/// clap only supports single-character short flags. Arguments after `--` are
/// left untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut out = Vec::new();

    for (index, arg) in args.into_iter().map(Into::into).enumerate() {
        if index == 0 || passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(text) => LEGACY_FLAGS.iter().find_map(|(short, long)| {
                if text == *short {
                    Some(OsString::from(*long))
                } else {
                    text.strip_prefix(short)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| OsString::from(format!("{}={}", long, value)))
                }
            }),
            None => None,
        };

        out.push(rewritten.unwrap_or(arg));
    }

    out
}
