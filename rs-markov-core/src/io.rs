use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Reads a whole text file into a `String`.
///
/// Unlike line-based readers, every character is kept, line breaks included:
/// they are part of what the model learns.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// File-backed character source.
///
/// Decodes the file as UTF-8 one line at a time and yields its characters in
/// order, line breaks included. The file is read once, front to back.
///
/// A read or decode failure ends the iteration early; the error is kept and
/// handed back by [`finish`](Self::finish), so callers can tell a clean end
/// of file from a broken one.
pub struct FileChars {
	reader: BufReader<File>,
	line: Vec<char>,
	position: usize,
	error: Option<io::Error>,
	done: bool,
}

impl FileChars {
	/// Opens `path` for reading.
	pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		let reader = BufReader::new(File::open(path)?);
		Ok(Self {
			reader,
			line: Vec::new(),
			position: 0,
			error: None,
			done: false,
		})
	}

	/// Consumes the source, returning the error that stopped it, if any.
	pub fn finish(self) -> io::Result<()> {
		match self.error {
			Some(e) => Err(e),
			None => Ok(()),
		}
	}

	/// Loads the next line into the buffer. Returns `false` at end of data.
	fn refill(&mut self) -> bool {
		let mut buffer = String::new();
		match self.reader.read_line(&mut buffer) {
			Ok(0) => false,
			Ok(_) => {
				self.line = buffer.chars().collect();
				self.position = 0;
				true
			}
			Err(e) => {
				self.error = Some(e);
				false
			}
		}
	}
}

impl Iterator for FileChars {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		if self.done {
			return None;
		}
		if self.position >= self.line.len() && !self.refill() {
			self.done = true;
			return None;
		}
		let c = self.line[self.position];
		self.position += 1;
		Some(c)
	}
}
