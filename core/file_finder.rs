use crate::{CoreError, CoreResult};
use clap::{Parser, Subcommand};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Parser, Clone, Default)]
#[clap(
    version = "0.1.0",
    about = "Strip comments and extra blank lines from C/C++ sources (main arguments)"
)]
pub struct ScrubArgs {
    #[clap(help = "Directory to clean [prompted for when omitted]")]
    pub path: Option<PathBuf>,

    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files/directories to skip [multiple allowed]", action = clap::ArgAction::Append )]
    pub exclude: Vec<String>,

    #[clap(
        long,
        short = 'j',
        value_name = "N",
        default_value_t = 1,
        help = "Number of files to process at once"
    )]
    pub jobs: usize,

    #[clap(long, help = "Report what would change without writing anything")]
    pub dry_run: bool,

    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,

    #[clap(short, long, action = clap::ArgAction::Count, help = "More diagnostics on stderr (-v, -vv)")]
    pub verbose: u8,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "cscrub",
    version = "0.1.0",
    about = "Strip comments and extra blank lines from C/C++ sources",
    long_about = "Recursively rewrites every .cpp and .h file under a directory with its\ncomments, trailing whitespace and extra blank lines removed.\nMatching is lexical: comment markers inside string literals are not recognised.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: ScrubArgs,
}

const TARGET_SUFFIXES: &[&str] = &[".cpp", ".h"];

/// Case-sensitive suffix test on the file name: `a.cpp` and `b.h` qualify,
/// `c.hpp` and `D.CPP` do not.
pub fn is_target_file(path: &Path) -> bool {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy();
            TARGET_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        }
        None => false,
    }
}

/// Lists every target file beneath `root`, depth-first, with entries sorted
/// by name at each directory level.
///
/// Nothing is hidden by `.gitignore` or dot-prefixes. Symlinked directories
/// are not descended. Entries the walker cannot read are logged and skipped.
pub fn find_files(root: &Path, exclude: &[String]) -> CoreResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(CoreError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root.to_path_buf()));
    }

    let mut o = OverrideBuilder::new(root);
    for p in exclude {
        o.add(&format!("!{}", p))
            .map_err(|source| CoreError::InvalidPattern {
                pattern: p.clone(),
                source,
            })?;
    }
    let overrides = o.build().map_err(|source| CoreError::InvalidPattern {
        pattern: exclude.join(", "),
        source,
    })?;

    let mut w = WalkBuilder::new(root);
    w.standard_filters(false);
    w.hidden(false);
    w.follow_links(false);
    w.overrides(overrides);
    w.sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for item in w.build() {
        match item {
            Ok(entry) => {
                let path = entry.path();
                if !path.is_dir() && is_target_file(path) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
            }
        }
    }
    debug!(root = %root.display(), count = files.len(), "walk finished");
    Ok(files)
}
