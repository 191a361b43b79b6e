//! Validation of the flat interaction file format.
//!
//! A valid file declares a positive interaction count `N` on its first line
//! and follows it with exactly `N` lines of two whitespace-separated tokens.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::error::FormatError;

/// Returns whether `path` names a well-formed interaction file.
///
/// Never fails: a missing or unreadable file is simply not an interaction
/// file. Use [`check_interaction_file`] to learn why a file was rejected.
///
/// # Examples
/// ```
/// use interactome_core::is_interaction_file;
///
/// assert!(!is_interaction_file("/definitely/not/here.txt"));
/// ```
#[must_use]
pub fn is_interaction_file(path: impl AsRef<Path>) -> bool {
    let file = path.as_ref();
    match check_interaction_file(file) {
        Ok(()) => true,
        Err(error) => {
            debug!(path = %file.display(), code = %error.code(), %error, "rejected interaction file");
            false
        }
    }
}

/// Validates the file at `path`, reporting the first problem found.
///
/// # Errors
/// Returns the [`FormatError`] describing why the file is not a valid
/// interaction description.
pub fn check_interaction_file(path: impl AsRef<Path>) -> Result<(), FormatError> {
    let lines = read_path(path.as_ref())?;
    validate_lines(&lines).map(|_| ())
}

/// Reads every line of `reader` into memory.
///
/// Line terminators are stripped; blank lines are kept so validation can
/// reject them.
///
/// # Errors
/// Returns [`FormatError::Unreadable`] when the reader fails, including on
/// invalid UTF-8.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use interactome_core::read_lines;
///
/// let lines = read_lines(Cursor::new("1\nA B\n"))?;
/// assert_eq!(lines, ["1", "A B"]);
/// # Ok::<(), interactome_core::FormatError>(())
/// ```
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, FormatError> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| {
            line.map_err(|err| FormatError::Unreadable {
                line: index + 1,
                kind: err.kind(),
            })
        })
        .collect()
}

/// Opens `path` and reads its lines; the handle is dropped before returning.
pub(crate) fn read_path(path: &Path) -> Result<Vec<String>, FormatError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FormatError::MissingFile {
            path: path.to_path_buf(),
        },
        kind => FormatError::Unreadable { line: 0, kind },
    })?;
    read_lines(BufReader::new(file))
}

/// Checks already-loaded lines against the interaction format.
///
/// Returns the declared interaction count on success.
///
/// # Errors
/// Returns the first [`FormatError`] encountered, checking the count line
/// first, then every interaction line in order, then the total line count.
///
/// # Examples
/// ```
/// use interactome_core::{FormatError, validate_lines};
///
/// assert_eq!(validate_lines(&["2", "A B", "B C"]), Ok(2));
/// assert_eq!(
///     validate_lines(&["2", "A B"]),
///     Err(FormatError::LineCountMismatch { declared: 2, found: 1 }),
/// );
/// ```
pub fn validate_lines<S: AsRef<str>>(lines: &[S]) -> Result<usize, FormatError> {
    let (count_line, interactions) = lines.split_first().ok_or(FormatError::MissingCount)?;
    let declared = parse_count(count_line.as_ref())?;

    for (offset, line) in interactions.iter().enumerate() {
        let tokens = line.as_ref().split_whitespace().count();
        if tokens != 2 {
            return Err(FormatError::MalformedLine {
                line: offset + 2,
                tokens,
            });
        }
    }

    if interactions.len() != declared {
        return Err(FormatError::LineCountMismatch {
            declared,
            found: interactions.len(),
        });
    }
    Ok(declared)
}

fn parse_count(raw: &str) -> Result<usize, FormatError> {
    let declared: usize = raw
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidCount {
            raw: raw.to_owned(),
        })?;
    if declared == 0 {
        return Err(FormatError::ZeroCount);
    }
    Ok(declared)
}
