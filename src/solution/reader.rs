//! Solution text parser.
//!
//! Each line is classified into the finite set of shapes its region allows,
//! and a state machine walks the regions: project records, an optional
//! dependency block per record, then the global block and its sections.
//! Preamble and tool chatter before `Global` is skipped; once inside the
//! global block every line must be accounted for, so anything unrecognized
//! there is a typed parse error rather than a silent drop.

use std::path::PathBuf;

use regex_lite::Regex;

use super::error::{ParseError, SolutionError};
use super::scanner::LineScanner;
use super::{GlobalSection, Project, Solution};

/// Fixed marker lines, matched by exact content ignoring surrounding
/// whitespace.
const PROJECT_END: &str = "EndProject";
const DEPENDENCIES_HEADER: &str = "ProjectSection(ProjectDependencies) = postProject";
const DEPENDENCIES_END: &str = "EndProjectSection";
const GLOBAL_START: &str = "Global";
const GLOBAL_END: &str = "EndGlobal";
const SECTION_END: &str = "EndGlobalSection";

/// Compiled patterns for the structured header lines.
struct LineMatcher {
    project_header: Regex,
    section_header: Regex,
    dependency_pair: Regex,
}

/// What a line can be while scanning project records.
enum ProjectsLine {
    /// `Project("{type}") = "name", "path", "{guid}"`.
    Header(Project),
    /// The `Global` marker opening the global block.
    GlobalStart,
    /// Preamble or tool chatter; ignored.
    Skipped,
}

/// What a line can be inside a dependency block.
enum DependenciesLine {
    /// `{guid} = {guid}`; the left GUID is the dependency.
    Pair(String),
    /// The `EndProjectSection` marker.
    End,
    Unrecognized,
}

/// What a line can be in the global block, outside any section.
enum GlobalsLine {
    /// `GlobalSection(name) = phase`.
    SectionHeader { name: String, phase: String },
    /// The `EndGlobal` marker.
    End,
    Unrecognized,
}

impl LineMatcher {
    fn new() -> Self {
        // Static patterns; compilation cannot fail.
        Self {
            project_header: Regex::new(
                r#"^Project\("\{([^}]+)\}"\)\s*=\s*"([^"]+)",\s*"([^"]+)",\s*"\{([^}]+)\}""#,
            )
            .unwrap(),
            section_header: Regex::new(r"^\s*GlobalSection\(([^)]+)\) = (.+)$").unwrap(),
            dependency_pair: Regex::new(r"^\s*\{([A-Za-z0-9-]+)\}\s*=\s*\{[A-Za-z0-9-]+\}")
                .unwrap(),
        }
    }

    fn classify_projects(&self, line: &str) -> ProjectsLine {
        if line.trim() == GLOBAL_START {
            return ProjectsLine::GlobalStart;
        }
        if let Some(caps) = self.project_header.captures(line) {
            let group = |n| caps.get(n).map(|m| m.as_str().to_string()).unwrap_or_default();
            return ProjectsLine::Header(Project {
                type_guid: group(1),
                name: group(2),
                relative_path: group(3),
                guid: group(4),
                dependencies: Vec::new(),
            });
        }
        ProjectsLine::Skipped
    }

    fn classify_dependencies(&self, line: &str) -> DependenciesLine {
        if line.trim() == DEPENDENCIES_END {
            return DependenciesLine::End;
        }
        if let Some(caps) = self.dependency_pair.captures(line) {
            let guid = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
            return DependenciesLine::Pair(guid);
        }
        DependenciesLine::Unrecognized
    }

    fn classify_globals(&self, line: &str) -> GlobalsLine {
        if line.trim() == GLOBAL_END {
            return GlobalsLine::End;
        }
        if let Some(caps) = self.section_header.captures(line.trim_end()) {
            let group = |n| caps.get(n).map(|m| m.as_str().to_string()).unwrap_or_default();
            return GlobalsLine::SectionHeader {
                name: group(1),
                phase: group(2),
            };
        }
        GlobalsLine::Unrecognized
    }
}

/// Parser position. The record or section under construction travels with
/// the state, so an end-of-input error can always name what was left open.
enum State {
    /// Scanning project records, before the `Global` marker.
    Projects,
    /// Inside the dependency block of `project`.
    Dependencies { project: Project },
    /// Inside the global block, between sections.
    Globals,
    /// Inside the body of `section`.
    SectionBody { section: GlobalSection },
    /// `EndGlobal` seen; any remaining input is ignored.
    Done,
}

pub(crate) fn parse(text: &str, source_path: PathBuf) -> Result<Solution, SolutionError> {
    let mut solution = Solution {
        projects: Vec::new(),
        sections: Vec::new(),
        source_path,
    };
    if let Err(source) = parse_into(text, &mut solution) {
        return Err(SolutionError::Malformed {
            path: solution.source_path,
            source,
        });
    }
    Ok(solution)
}

fn parse_into(text: &str, solution: &mut Solution) -> Result<(), ParseError> {
    let matcher = LineMatcher::new();
    let mut scanner = LineScanner::new(text);
    let mut state = State::Projects;

    while let Some(line) = scanner.next_line() {
        state = match state {
            State::Projects => match matcher.classify_projects(line) {
                ProjectsLine::Header(project) => {
                    // The line after a header either opens the dependency
                    // block or closes the record.
                    let next = next_record_line(&mut scanner, &project)?;
                    if next.trim() == DEPENDENCIES_HEADER {
                        State::Dependencies { project }
                    } else {
                        close_project(project, next, &mut solution.projects)?;
                        State::Projects
                    }
                }
                ProjectsLine::GlobalStart => State::Globals,
                ProjectsLine::Skipped => State::Projects,
            },
            State::Dependencies { mut project } => match matcher.classify_dependencies(line) {
                DependenciesLine::Pair(guid) => {
                    project.dependencies.push(guid);
                    State::Dependencies { project }
                }
                DependenciesLine::End => {
                    let next = next_record_line(&mut scanner, &project)?;
                    close_project(project, next, &mut solution.projects)?;
                    State::Projects
                }
                DependenciesLine::Unrecognized => {
                    return Err(ParseError::BadDependencyLine {
                        project: project.name,
                        line: line.trim_end().to_string(),
                    });
                }
            },
            State::Globals => match matcher.classify_globals(line) {
                GlobalsLine::SectionHeader { name, phase } => State::SectionBody {
                    section: GlobalSection {
                        name,
                        phase,
                        lines: Vec::new(),
                    },
                },
                GlobalsLine::End => State::Done,
                GlobalsLine::Unrecognized => {
                    return Err(ParseError::UnexpectedInput {
                        line: line.trim_end().to_string(),
                    });
                }
            },
            State::SectionBody { mut section } => {
                if line.trim() == SECTION_END {
                    solution.insert_section(section);
                    State::Globals
                } else {
                    section.lines.push(line.to_string());
                    State::SectionBody { section }
                }
            }
            State::Done => State::Done,
        };
    }

    match state {
        State::Done => Ok(()),
        State::Projects => Err(ParseError::UnexpectedEof {
            context: "project records".to_string(),
        }),
        State::Dependencies { project } => Err(ParseError::UnexpectedEof {
            context: format!("project {}", project.name),
        }),
        State::Globals => Err(ParseError::UnexpectedEof {
            context: "global sections".to_string(),
        }),
        State::SectionBody { section } => Err(ParseError::UnexpectedEof {
            context: format!("global section {}", section.name),
        }),
    }
}

/// Pull the next line of an open project record, turning end of input into
/// an error that names the record.
fn next_record_line<'a>(
    scanner: &mut LineScanner<'a>,
    project: &Project,
) -> Result<&'a str, ParseError> {
    scanner.next_line().ok_or_else(|| ParseError::UnexpectedEof {
        context: format!("project {}", project.name),
    })
}

/// Require `line` to be the `EndProject` marker and commit the record.
fn close_project(
    project: Project,
    line: &str,
    projects: &mut Vec<Project>,
) -> Result<(), ParseError> {
    if line.trim() == PROJECT_END {
        projects.push(project);
        Ok(())
    } else {
        Err(ParseError::MissingEndProject {
            project: project.name,
            line: line.trim_end().to_string(),
        })
    }
}
