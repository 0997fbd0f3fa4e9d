use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves a corpus location given on the command line or in a config file.
///
/// A bare current-directory path (`.` or `./`) becomes the absolute working
/// directory so it can be logged meaningfully; anything else is kept verbatim.
pub fn normalize_folder(input: &str) -> PathBuf {
	match input {
		"." | "./" => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(input)),
		other => PathBuf::from(other),
	}
}

/// Lists the regular files of a directory, sorted by name.
///
/// Returns full paths. Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Reads a training corpus.
///
/// - A file is read whole
/// - A directory has its files read in name order, joined by a newline
///   so that words never run across file boundaries
pub fn read_corpus<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let path = path.as_ref();
	let path = match path.to_str() {
		Some(s) => normalize_folder(s),
		None => path.to_path_buf(),
	};

	if !path.is_dir() {
		return fs::read_to_string(&path);
	}

	let files = list_files(&path)?;
	let mut parts = Vec::with_capacity(files.len());
	for file in &files {
		parts.push(fs::read_to_string(file)?);
	}
	log::info!("read {} corpus files from {}", files.len(), path.display());

	Ok(parts.join("\n"))
}
