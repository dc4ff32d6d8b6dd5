use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{LangIdError, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory, the handle is released before returning
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| LangIdError::io(path, source))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Extracts the file name of a path.
///
/// Examples:
/// - `"./data/test/en/letter.txt"` → `"letter.txt"`
/// - `"letter"` → `"letter"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> String {
	let path = input_path.as_ref();
	path.file_name()
		.map(|name| name.to_string_lossy().to_string())
		.unwrap_or_else(|| path.display().to_string())
}

/// Lists all regular files directly contained in a directory.
///
/// Subdirectories are ignored. Paths are sorted so that callers get a
/// deterministic order whatever the file system returns.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(LangIdError::NotADirectory(dir.to_path_buf()));
	}

	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(|source| LangIdError::io(dir, source))? {
		let path = entry.map_err(|source| LangIdError::io(dir, source))?.path();
		if path.is_file() {
			files.push(path);
		}
	}
	files.sort();

	Ok(files)
}
