use cscrub_core::{
    CliArgs, Command as CoreCommand, FileReport, Outcome, ProcessOptions, Report, find_files,
    process_files,
};
mod interaction;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_outcome(report: &FileReport) {
    let path = report.path.display();
    match &report.outcome {
        Outcome::Cleaned => println!("{} Cleaned: {}", style("[OK]").green(), path),
        Outcome::WouldClean => println!("{} Would clean: {}", style("[DRY]").cyan(), path),
        Outcome::Unchanged => println!(
            "{} No change: {}",
            style("[SKIP]").dim(),
            style(path).dim()
        ),
        Outcome::Failed(msg) => eprintln!(
            "{} {}: {}",
            style("[ERROR]").red(),
            path,
            style(msg).red()
        ),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "file" } else { "files" }
}

fn print_summary(report: &Report, dry_run: bool) {
    let examined = report.examined();
    println!(
        "\n{} Examined {} .cpp / .h {}.",
        style("Done!").green().bold(),
        style(examined).cyan(),
        plural(examined)
    );
    println!(
        "Result: {} {}, {} unchanged, {} failed.",
        style(report.cleaned()).green(),
        if dry_run { "would be cleaned" } else { "cleaned" },
        style(report.unchanged()).dim(),
        style(report.failed()).red()
    );
}

fn resolve_root(path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match path {
        Some(p) => Ok(Some(p)),
        None => interaction::select_folder(),
    }
}

fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let main_app_args = cli.main_opts;
    init_tracing(main_app_args.verbose);
    let options = ProcessOptions::from(&main_app_args);

    let root = match resolve_root(main_app_args.path.clone()) {
        Ok(Some(root)) => root,
        Ok(None) => {
            println!("No folder selected, operation cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("{}", style(format!("Error selecting folder: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("\nProcessing directory: {}\n", style(root.display()).cyan());
    info!(root = %root.display(), jobs = options.jobs, dry_run = options.dry_run, "starting");

    let files_to_process = match find_files(&root, &main_app_args.exclude) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", style(format!("Error finding files: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    if files_to_process.is_empty() {
        println!("No .cpp / .h files found.");
        print_summary(&Report::default(), options.dry_run);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} {}:", files_to_process.len(), plural(files_to_process.len()));
    for file in files_to_process.iter().take(10) {
        println!("  {}", style(file.display()).dim());
    }
    if files_to_process.len() > 10 {
        println!("  ... and {} more.", files_to_process.len() - 10);
    }

    let skip_prompt = main_app_args.no_confirm || options.dry_run;
    match interaction::confirm_processing(files_to_process.len(), skip_prompt) {
        Ok(true) => {}
        Ok(false) => return Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Error during confirmation: {}", e)).red()
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    println!();
    let report = match process_files(files_to_process, &options, print_outcome) {
        Ok(report) => report,
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Critical error during processing setup: {}", e)).red()
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    print_summary(&report, options.dry_run);

    if report.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
