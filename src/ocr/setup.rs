use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::TesseractConfig;
use crate::log;

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const EXECUTABLE_NAME: &str = "tesseract";

/// Install locations checked after the local directory and PATH.
const COMMON_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

#[derive(Debug, Clone)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    /// `None` lets Tesseract use its compiled-in tessdata location
    pub tessdata: Option<PathBuf>,
}

/// Returns the per-user directory for a private Tesseract install
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trivia-solver")
        .join("tesseract")
}

/// Resolves the Tesseract executable and tessdata directory.
///
/// Failing to find the executable is the OCR initialization failure that
/// aborts the program; a missing tessdata directory is left to Tesseract.
pub fn locate_tesseract(config: &TesseractConfig) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable(config.executable.as_deref())?;
    let tessdata = find_tessdata_dir(config.tessdata.as_deref(), &config.language);

    log(&format!("Tesseract found at: {}", executable.display()));
    if let Some(dir) = &tessdata {
        log(&format!("Using tessdata: {}", dir.display()));
    }

    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

fn runs(exe: &Path) -> bool {
    Command::new(exe)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Finds the Tesseract executable: explicit path, local dir, PATH, then common paths
pub fn find_tesseract_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "Configured Tesseract executable does not exist: {}",
            path.display()
        ));
    }

    let local_exe = get_tesseract_dir().join(EXECUTABLE_NAME);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    let on_path = PathBuf::from(EXECUTABLE_NAME);
    if runs(&on_path) {
        return Ok(on_path);
    }

    for path in COMMON_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Please install Tesseract-OCR or set tesseract.executable in config.json."
    ))
}

/// Finds a tessdata directory containing `<language>.traineddata`
pub fn find_tessdata_dir(explicit: Option<&Path>, language: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let traineddata = format!("{}.traineddata", language);
    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join(&traineddata).exists() {
        return Some(local_tessdata);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join(&traineddata).exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join(&traineddata).exists() {
            return Some(p);
        }
    }

    None
}
