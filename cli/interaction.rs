use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// Asks for the folder to clean. An empty answer means the user backed out.
pub fn select_folder() -> Result<Option<PathBuf>> {
    let answer: String = Input::new()
        .with_prompt("Folder to clean (leave empty to cancel)")
        .allow_empty(true)
        .interact_text()?;

    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(answer)))
}

pub fn confirm_processing(file_count: usize, no_confirm: bool) -> Result<bool> {
    if no_confirm {
        return Ok(true);
    }
    if file_count == 0 {
        println!("No files to process.");
        return Ok(false);
    }

    let prompt = format!(
        "Strip comments from {} files in place? There is no backup.",
        style(file_count).cyan()
    );

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user.");
    }

    Ok(confirmed)
}
