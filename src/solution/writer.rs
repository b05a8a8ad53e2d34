//! Canonical serialization of a solution back to text.
//!
//! Output layout is fixed: byte-order mark, blank line, the two header
//! lines, project records, then the global block. Section bodies are copied
//! through byte for byte; everything structural is emitted with `\n` and
//! tab indentation.

use super::{GlobalSection, Project, Solution};

/// Byte-order mark expected at the start of every solution file.
const BOM: char = '\u{feff}';

/// Fixed file header, written above the project records.
const HEADER: &str = "\nMicrosoft Visual Studio Solution File, Format Version 11.00\n# Visual Studio 2010\n";

pub(crate) fn render(solution: &Solution) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(HEADER);
    for project in &solution.projects {
        render_project(&mut out, project);
    }
    out.push_str("Global\n");
    for section in &solution.sections {
        render_section(&mut out, section);
    }
    out.push_str("EndGlobal\n");
    out
}

fn render_project(out: &mut String, project: &Project) {
    out.push_str(&format!(
        "Project(\"{{{}}}\") = \"{}\", \"{}\", \"{{{}}}\"\n",
        project.type_guid, project.name, project.relative_path, project.guid
    ));
    if !project.dependencies.is_empty() {
        out.push_str("\tProjectSection(ProjectDependencies) = postProject\n");
        for guid in &project.dependencies {
            out.push_str(&format!("\t\t{{{guid}}} = {{{guid}}}\n"));
        }
        out.push_str("\tEndProjectSection\n");
    }
    out.push_str("EndProject\n");
}

fn render_section(out: &mut String, section: &GlobalSection) {
    out.push_str(&format!(
        "\tGlobalSection({}) = {}\n",
        section.name, section.phase
    ));
    for line in &section.lines {
        out.push_str(line);
    }
    out.push_str("\tEndGlobalSection\n");
}
