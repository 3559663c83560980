use crate::CoreResult;
use crate::file_finder::{ScrubArgs, find_files};
use crate::stripper;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Content changed and the file was rewritten.
    Cleaned,
    /// Content would change; dry run, nothing written.
    WouldClean,
    /// Transform output equals the current content; file untouched.
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Per-file outcomes of one run, in traversal order.
#[derive(Debug, Default)]
pub struct Report {
    pub files: Vec<FileReport>,
}

impl Report {
    /// Every target file counts, whatever happened to it.
    pub fn examined(&self) -> usize {
        self.files.len()
    }

    pub fn cleaned(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Cleaned | Outcome::WouldClean))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub jobs: usize,
    pub dry_run: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            jobs: 1,
            dry_run: false,
        }
    }
}

impl From<&ScrubArgs> for ProcessOptions {
    fn from(args: &ScrubArgs) -> Self {
        ProcessOptions {
            jobs: args.jobs.max(1),
            dry_run: args.dry_run,
        }
    }
}

fn map_err_to_string<E: std::fmt::Display>(p: &Path, c: &str) -> impl Fn(E) -> String {
    let d = p.display().to_string();
    move |e| format!("{} failed for {}: {}", c, d, e)
}

/// Reads, cleans and (if the text changed) rewrites one file.
///
/// The file is read as text: undecodable UTF-8 sequences become U+FFFD and
/// `\r\n` or lone `\r` become `\n`, so a rewritten file loses both for good.
/// Never returns an error: failures come back as [`Outcome::Failed`].
pub fn process_file(path: &Path, options: &ProcessOptions) -> Outcome {
    match clean_single_file(path, options.dry_run) {
        Ok(outcome) => outcome,
        Err(msg) => Outcome::Failed(msg),
    }
}

fn read_text(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(map_err_to_string(path, "Read"))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(stripper::normalize_line_endings(&text))
}

fn clean_single_file(path: &Path, dry_run: bool) -> Result<Outcome, String> {
    let original = read_text(path)?;
    let cleaned = stripper::transform(&original);

    if cleaned == original {
        return Ok(Outcome::Unchanged);
    }
    if dry_run {
        return Ok(Outcome::WouldClean);
    }
    replace_contents(path, &cleaned)?;
    Ok(Outcome::Cleaned)
}

#[cfg(unix)]
fn has_other_links(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_metadata: &fs::Metadata) -> bool {
    false
}

// Normally a sibling temp file is renamed over the target, so a failed write
// leaves the original in place. Hard-linked files and directories that refuse
// the temp file get a plain overwrite instead.
fn replace_contents(path: &Path, content: &str) -> Result<(), String> {
    let target = fs::canonicalize(path).map_err(map_err_to_string(path, "Resolve"))?;
    let metadata = fs::metadata(&target).map_err(map_err_to_string(path, "Stat"))?;
    let permissions = metadata.permissions();
    if permissions.readonly() {
        return Err(format!("Write failed for {}: file is read-only", path.display()));
    }
    if has_other_links(&metadata) {
        debug!(path = %path.display(), "hard-linked, writing in place");
        return write_in_place(path, &target, content);
    }
    let parent_dir = target
        .parent()
        .ok_or_else(|| format!("Failed to get parent dir for {}", path.display()))?;

    let mut temp_file = match tempfile::Builder::new()
        .prefix(".cscrub_")
        .suffix(".tmp")
        .tempfile_in(parent_dir)
    {
        Ok(temp_file) => temp_file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no temp file, writing in place");
            return write_in_place(path, &target, content);
        }
    };
    temp_file
        .write_all(content.as_bytes())
        .map_err(map_err_to_string(path, "Write temp file"))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(map_err_to_string(path, "Flush temp file"))?;
    fs::set_permissions(temp_file.path(), permissions)
        .map_err(map_err_to_string(path, "Copy permissions"))?;

    temp_file.persist(&target).map_err(|persist_error| {
        format!(
            "Replace failed for {}: {}",
            path.display(),
            persist_error.error
        )
    })?;
    Ok(())
}

fn write_in_place(path: &Path, target: &Path, content: &str) -> Result<(), String> {
    fs::write(target, content).map_err(map_err_to_string(path, "Write"))
}

fn log_outcome(report: &FileReport) {
    match &report.outcome {
        Outcome::Failed(msg) => {
            debug!(path = %report.path.display(), error = %msg, "file failed");
        }
        other => {
            debug!(path = %report.path.display(), outcome = ?other, "file done");
        }
    }
}

/// Processes `files` and collects a [`Report`] in the order given.
///
/// `on_file` fires once per file as soon as it is done. With `jobs > 1` the
/// files are spread over a rayon pool of that size and `on_file` sees them in
/// completion order; the returned report keeps input order either way.
pub fn process_files<F>(
    files: Vec<PathBuf>,
    options: &ProcessOptions,
    on_file: F,
) -> CoreResult<Report>
where
    F: Fn(&FileReport) + Sync,
{
    let run = |path: &PathBuf| {
        let report = FileReport {
            path: path.clone(),
            outcome: process_file(path, options),
        };
        log_outcome(&report);
        on_file(&report);
        report
    };

    let results: Vec<FileReport> = if options.jobs <= 1 {
        files.iter().map(run).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()?;
        pool.install(|| files.par_iter().map(run).collect())
    };
    Ok(Report { files: results })
}

/// Cleans every `.cpp`/`.h` file beneath `root`.
///
/// Per-file failures are recorded in the report and never abort the walk;
/// `Err` only comes from a bad root, a bad exclude pattern or pool setup.
pub fn process_tree<F>(
    root: &Path,
    exclude: &[String],
    options: &ProcessOptions,
    on_file: F,
) -> CoreResult<Report>
where
    F: Fn(&FileReport) + Sync,
{
    let files = find_files(root, exclude)?;
    process_files(files, options, on_file)
}
