//! Error types for solution parsing, merging, and file I/O.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by solution file operations.
#[derive(Debug, Error)]
pub enum SolutionError {
    /// The input text violates the solution grammar.
    #[error("malformed solution file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Two merge inputs declare a project with the same GUID.
    #[error(
        "duplicate project GUID {{{guid}}} declared by both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateProjectGuid {
        guid: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Reading or writing a file failed before the format was involved.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Grammar violations, independent of which file they came from.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input ended while a record or section still needed more lines.
    #[error("unexpected end of file while reading {context}")]
    UnexpectedEof { context: String },

    /// A line between `Global` and `EndGlobal` that is neither a section
    /// header nor a recognized marker.
    #[error("unexpected input in global block: {line:?}")]
    UnexpectedInput { line: String },

    /// A line inside a dependency block that is neither a GUID pair nor
    /// `EndProjectSection`.
    #[error("bad dependency line in project {project}: {line:?}")]
    BadDependencyLine { project: String, line: String },

    /// A project record that does not close with `EndProject` where one is
    /// required.
    #[error("expected EndProject in project {project}, found {line:?}")]
    MissingEndProject { project: String, line: String },
}
