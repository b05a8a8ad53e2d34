//! sln-merge - Visual Studio solution file parser and merger
//!
//! Parses `.sln` files into a structured model, combines any number of them
//! into one master solution, and writes the result back in the exact layout
//! the consuming toolchain expects. Merging rebases each project's path
//! under its source solution's directory and reconciles the global
//! configuration sections, so the master file builds everything the input
//! files built.

pub mod config;
pub mod solution;

pub use config::{ConfigError, MergeConfig};
pub use solution::{
    combine_files, merge_solutions, GlobalSection, MergeOptions, ParseError, Project, Solution,
    SolutionError, TypeGuidPolicy, MERGED_TYPE_GUID,
};
