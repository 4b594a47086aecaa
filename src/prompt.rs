//! Interactive fallback for files no rule can place.
//!
//! The capability is a trait so the orchestrator never depends on a real
//! terminal: the CLI installs [`ConsolePrompt`], tests install a scripted
//! implementation. The prompt blocks the whole pipeline; nothing is
//! scanned, classified, or transferred while it is open.

use crate::category::{FALLBACK_CATEGORY, dot_extension};
use dialoguer::Input;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};

/// The operator's answer for one uncategorized file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Put the file (and later files of the same extension) in the generic
    /// fallback category.
    Fallback,
    /// Put it in a newly named folder under the destination root.
    Folder(PathBuf),
    /// Register a regex rule for the remainder of the run; this file and
    /// every later match go to `target`.
    Pattern { pattern: String, target: PathBuf },
}

/// Decides where an uncategorized file belongs.
pub trait UnknownFileResolver {
    /// Produces a resolution for `file`, destined somewhere under
    /// `dest_root`. Implementations may block on user input.
    fn resolve(&mut self, file: &Path, dest_root: &Path) -> io::Result<Resolution>;
}

/// Console-driven resolver: prints a blocking prompt, reads one integer
/// choice, re-asks on invalid input.
pub struct ConsolePrompt;

impl UnknownFileResolver for ConsolePrompt {
    fn resolve(&mut self, file: &Path, dest_root: &Path) -> io::Result<Resolution> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = dot_extension(&file_name).unwrap_or_else(|| file_name.clone());

        println!("\n--------------------------------------------------");
        println!("Uncategorized file type '{}' for file: {}", ext, file_name);
        println!(
            "Where should files of this type go (under {})?",
            dest_root.display()
        );
        println!("  1. Put in '{}' folder", FALLBACK_CATEGORY);
        println!("  2. Create a new folder");
        println!("  3. Add a regex rule for this run");

        let choice: u8 = Input::new()
            .with_prompt("Enter your choice (1-3)")
            .validate_with(|input: &u8| {
                if (1..=3).contains(input) {
                    Ok(())
                } else {
                    Err("Please enter 1, 2 or 3")
                }
            })
            .interact_text()
            .map_err(into_io_error)?;

        let resolution = match choice {
            1 => Resolution::Fallback,
            2 => {
                let folder = read_folder_name("New folder name (e.g. 'CAD_Files')")?;
                Resolution::Folder(PathBuf::from(folder))
            }
            _ => {
                let pattern: String = Input::new()
                    .with_prompt("Regex matched against full file names")
                    .validate_with(|input: &String| match Regex::new(input) {
                        Ok(_) => Ok(()),
                        Err(e) => Err(e.to_string()),
                    })
                    .interact_text()
                    .map_err(into_io_error)?;
                let folder = read_folder_name("Destination folder for matching files")?;
                Resolution::Pattern {
                    pattern,
                    target: PathBuf::from(folder),
                }
            }
        };

        match &resolution {
            Resolution::Fallback => {
                println!("'{}' files will now be placed in '{}'.", ext, FALLBACK_CATEGORY);
            }
            Resolution::Folder(folder) => {
                println!("'{}' files will now be placed in '{}'.", ext, folder.display());
            }
            Resolution::Pattern { pattern, target } => {
                println!(
                    "Files matching '{}' will be placed in '{}' for this run.",
                    pattern,
                    target.display()
                );
            }
        }
        println!("--------------------------------------------------\n");

        Ok(resolution)
    }
}

fn read_folder_name(prompt: &str) -> io::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Folder name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(into_io_error)
}

fn into_io_error(e: dialoguer::Error) -> io::Error {
    match e {
        dialoguer::Error::IO(e) => e,
    }
}
