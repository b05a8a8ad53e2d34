//! Visual Studio solution files: model, parser, merger, writer.
//!
//! A parsed [`Solution`] is plain data: project records in declaration
//! order, a name-unique ordered table of global sections, and the path the
//! text came from. Parsing and serialization are inverses over that data,
//! and [`merge_solutions`] combines any number of parsed documents into a
//! master solution without touching its inputs.

mod error;
mod merge;
mod reader;
mod scanner;
mod writer;

pub use error::{ParseError, SolutionError};
pub use merge::{
    combine_files, merge_solutions, MergeOptions, TypeGuidPolicy, MERGED_TYPE_GUID,
};
pub use scanner::LineScanner;

use std::fs;
use std::path::{Path, PathBuf};

/// One sub-project declared by a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project-type GUID from the record header, braces stripped.
    pub type_guid: String,
    /// Display name.
    pub name: String,
    /// Path to the project file, relative to the declaring solution's
    /// directory.
    pub relative_path: String,
    /// The project's own GUID, braces stripped.
    pub guid: String,
    /// GUIDs of same-solution projects this one builds after, in
    /// declaration order.
    pub dependencies: Vec<String>,
}

/// A named, phase-tagged block of solution-wide configuration lines.
///
/// Body lines are opaque to this crate: stored exactly as read, terminators
/// included, and re-emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSection {
    pub name: String,
    /// Load phase tag from the header (`preSolution` or `postSolution`),
    /// carried through unchanged.
    pub phase: String,
    pub lines: Vec<String>,
}

/// The parsed form of one solution file.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Projects in declaration order.
    pub projects: Vec<Project>,
    /// Global sections in declaration order. Names are unique; a repeated
    /// name in the input replaces the earlier body.
    pub sections: Vec<GlobalSection>,
    /// Where this document came from. Merging rebases project paths against
    /// this path's directory.
    pub source_path: PathBuf,
}

impl Solution {
    /// Parse solution text. `source_path` is recorded on the document for
    /// later path rebasing and appears in parse errors.
    pub fn parse(text: &str, source_path: impl Into<PathBuf>) -> Result<Self, SolutionError> {
        reader::parse(text, source_path.into())
    }

    /// Read and parse a solution file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SolutionError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SolutionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Look up a global section by name.
    pub fn section(&self, name: &str) -> Option<&GlobalSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Insert a section, keeping names unique: a section with a name already
    /// in the table replaces the existing one in place, preserving its slot
    /// in the document order.
    pub fn insert_section(&mut self, section: GlobalSection) {
        match self
            .sections
            .iter_mut()
            .find(|existing| existing.name == section.name)
        {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    /// Serialize back to solution file text, byte-order mark included.
    pub fn to_text(&self) -> String {
        writer::render(self)
    }

    /// Serialize and write to `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SolutionError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| SolutionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
