//! Combining parsed solutions into one master solution.
//!
//! The merge is a pure function over borrowed inputs: nothing is consumed
//! or mutated, so the same [`Solution`] values can feed any number of
//! merges. Project records are concatenated in input order with their paths
//! rebased under each source file's directory; the three well-known global
//! sections get their own policies and every other section is concatenated
//! by name.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::error::SolutionError;
use super::{GlobalSection, Project, Solution};

/// Type GUID stamped on every merged project under the default policy.
pub const MERGED_TYPE_GUID: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

/// Solution-wide build configurations; merged as a deduplicated union.
const SOLUTION_CONFIGURATION: &str = "SolutionConfigurationPlatforms";
/// Per-project build configurations; merged by concatenation.
const PROJECT_CONFIGURATION: &str = "ProjectConfigurationPlatforms";
/// Always written with one fixed body, never copied from inputs.
const SOLUTION_PROPERTIES: &str = "SolutionProperties";

/// Sections with first-class merge policy. Anything else is concatenated
/// under its own name.
const POLICY_SECTIONS: &[&str] = &[
    SOLUTION_CONFIGURATION,
    PROJECT_CONFIGURATION,
    SOLUTION_PROPERTIES,
];

/// How merged projects get their type GUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeGuidPolicy {
    /// Stamp one fixed type GUID on every project.
    Fixed(String),
    /// Keep each project's own type GUID.
    Keep,
}

/// Merge policy knobs.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Defaults to `Fixed(MERGED_TYPE_GUID)`, the GUID the consuming
    /// toolchain expects on combined entries.
    pub type_guid: TypeGuidPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            type_guid: TypeGuidPolicy::Fixed(MERGED_TYPE_GUID.to_string()),
        }
    }
}

/// Combine parsed solutions into one master document rooted at
/// `output_path`.
///
/// Projects keep their declaration order within each input and inputs keep
/// their argument order. Each project's path is joined under its source
/// solution's directory so it stays valid from the merged file's location.
/// A project GUID appearing in more than one input is rejected; the merged
/// document would be ambiguous.
pub fn merge_solutions(
    inputs: &[Solution],
    output_path: impl Into<PathBuf>,
    options: &MergeOptions,
) -> Result<Solution, SolutionError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for solution in inputs {
        for project in &solution.projects {
            if let Some(first) = seen.insert(&project.guid, &solution.source_path) {
                return Err(SolutionError::DuplicateProjectGuid {
                    guid: project.guid.clone(),
                    first: first.to_path_buf(),
                    second: solution.source_path.clone(),
                });
            }
        }
    }

    let mut merged = Solution {
        projects: Vec::new(),
        sections: Vec::new(),
        source_path: output_path.into(),
    };

    for solution in inputs {
        let base = solution.source_path.parent().unwrap_or(Path::new(""));
        for project in &solution.projects {
            merged.projects.push(Project {
                type_guid: match &options.type_guid {
                    TypeGuidPolicy::Fixed(guid) => guid.clone(),
                    TypeGuidPolicy::Keep => project.type_guid.clone(),
                },
                name: project.name.clone(),
                relative_path: rebase(base, &project.relative_path),
                guid: project.guid.clone(),
                dependencies: project.dependencies.clone(),
            });
        }
    }

    // Union of the solution-wide configurations, deduplicated; the set
    // writes out in sorted order.
    let mut configurations = BTreeSet::new();
    for solution in inputs {
        if let Some(section) = solution.section(SOLUTION_CONFIGURATION) {
            configurations.extend(section.lines.iter().cloned());
        }
    }
    merged.insert_section(GlobalSection {
        name: SOLUTION_CONFIGURATION.to_string(),
        phase: "preSolution".to_string(),
        lines: configurations.into_iter().collect(),
    });

    merged.insert_section(GlobalSection {
        name: SOLUTION_PROPERTIES.to_string(),
        phase: "preSolution".to_string(),
        lines: vec!["\t\tHideSolutionNode = FALSE\n".to_string()],
    });

    // Per-project configurations are per-GUID, so plain concatenation in
    // input order is already collision-free.
    let mut project_configurations = Vec::new();
    for solution in inputs {
        if let Some(section) = solution.section(PROJECT_CONFIGURATION) {
            project_configurations.extend(section.lines.iter().cloned());
        }
    }
    merged.insert_section(GlobalSection {
        name: PROJECT_CONFIGURATION.to_string(),
        phase: "postSolution".to_string(),
        lines: project_configurations,
    });

    // Everything else merges generically: sections with the same name are
    // concatenated in input order under the first contributor's phase, and
    // new names append in first-encounter order.
    for solution in inputs {
        for section in &solution.sections {
            if POLICY_SECTIONS.contains(&section.name.as_str()) {
                continue;
            }
            match merged
                .sections
                .iter_mut()
                .find(|existing| existing.name == section.name)
            {
                Some(existing) => existing.lines.extend(section.lines.iter().cloned()),
                None => merged.sections.push(section.clone()),
            }
        }
    }

    Ok(merged)
}

/// Read `inputs`, merge them, and write the result to `output`.
///
/// Every input is parsed before any output byte is written, so a failure on
/// any input leaves `output` untouched.
pub fn combine_files(
    inputs: &[PathBuf],
    output: &Path,
    options: &MergeOptions,
) -> Result<Solution, SolutionError> {
    let mut solutions = Vec::with_capacity(inputs.len());
    for path in inputs {
        solutions.push(Solution::from_file(path)?);
    }
    let merged = merge_solutions(&solutions, output, options)?;
    merged.write_to_file(output)?;
    Ok(merged)
}

fn rebase(base: &Path, relative: &str) -> String {
    if base.as_os_str().is_empty() {
        relative.to_string()
    } else {
        base.join(relative).to_string_lossy().into_owned()
    }
}
