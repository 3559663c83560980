pub mod file_finder;
pub mod processor;
pub mod stripper;

use std::path::PathBuf;

pub use file_finder::{CliArgs, Command, CompletionArgs, ScrubArgs, find_files, is_target_file};

pub use processor::{
    FileReport, Outcome, ProcessOptions, Report, process_file, process_files, process_tree,
};
pub use stripper::transform;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("Path not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type CoreResult<T> = Result<T, CoreError>;
