//! sln-merge CLI
//!
//! Entry point for the `sln-merge` command-line tool.

use clap::{Parser, Subcommand};
use sln_merge::{merge_solutions, MergeConfig, MergeOptions, Solution, TypeGuidPolicy};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "sln-merge")]
#[command(about = "Combine Visual Studio solution files into one master solution", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge solution files into one master solution
    Merge {
        /// Where to write the merged solution (default: Master.sln)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Keep each project's own type GUID instead of stamping the fixed one
        #[arg(long)]
        keep_types: bool,

        /// Type GUID to stamp on every merged project (braces optional)
        #[arg(long, conflicts_with = "keep_types")]
        type_guid: Option<String>,

        /// Path to the defaults file (default: sln-merge.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Input solution files (default: the 'inputs' list from the defaults file)
        inputs: Vec<PathBuf>,
    },

    /// Parse a solution file and report what it contains
    Check {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// The solution file to check
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            output,
            keep_types,
            type_guid,
            config,
            inputs,
        } => {
            run_merge(output, keep_types, type_guid, config, inputs);
        }
        Commands::Check { json, file } => {
            run_check(&file, json);
        }
    }
}

fn run_merge(
    output: Option<PathBuf>,
    keep_types: bool,
    type_guid: Option<String>,
    config_path: Option<PathBuf>,
    inputs: Vec<PathBuf>,
) {
    let config = match load_merge_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let inputs = if inputs.is_empty() {
        config.as_ref().map(|c| c.inputs.clone()).unwrap_or_default()
    } else {
        inputs
    };

    if inputs.is_empty() {
        eprintln!("No input solutions: pass paths on the command line or list them in sln-merge.toml");
        process::exit(2);
    }

    let output = output
        .or_else(|| config.as_ref().and_then(|c| c.output.clone()))
        .unwrap_or_else(|| PathBuf::from("Master.sln"));

    let mut options = MergeOptions::default();
    if keep_types || config.as_ref().is_some_and(|c| c.keep_project_types) {
        options.type_guid = TypeGuidPolicy::Keep;
    }
    if let Some(guid) = type_guid {
        let guid = guid.trim_matches(|c| c == '{' || c == '}').to_string();
        options.type_guid = TypeGuidPolicy::Fixed(guid);
    }

    // Parse everything up front; a bad input must not leave a half-written
    // master file behind.
    let mut solutions = Vec::with_capacity(inputs.len());
    for path in &inputs {
        match Solution::from_file(path) {
            Ok(solution) => solutions.push(solution),
            Err(e) => {
                eprintln!("Failed to read one of the solution files: {}", e);
                process::exit(1);
            }
        }
    }

    let merged = match merge_solutions(&solutions, &output, &options) {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("Failed to generate the solution file: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = merged.write_to_file(&output) {
        eprintln!("Failed to generate the solution file: {}", e);
        process::exit(1);
    }

    println!(
        "Merged {} solution{} into {} ({} projects)",
        inputs.len(),
        if inputs.len() == 1 { "" } else { "s" },
        output.display(),
        merged.projects.len()
    );
    for (path, solution) in inputs.iter().zip(&solutions) {
        println!(
            "  {}: {} project{}",
            path.display(),
            solution.projects.len(),
            if solution.projects.len() == 1 { "" } else { "s" }
        );
    }
}

fn load_merge_config(config_path: Option<PathBuf>) -> Result<Option<MergeConfig>, String> {
    let path = config_path.unwrap_or_else(|| PathBuf::from("sln-merge.toml"));

    if path.exists() {
        MergeConfig::from_file(&path).map(Some).map_err(|e| e.to_string())
    } else {
        // Flags and arguments carry everything when no file exists.
        Ok(None)
    }
}

fn run_check(path: &Path, json_output: bool) {
    let solution = match Solution::from_file(path) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "projects": solution
                .projects
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "path": p.relative_path,
                        "guid": p.guid,
                        "type_guid": p.type_guid,
                        "dependencies": p.dependencies,
                    })
                })
                .collect::<Vec<_>>(),
            "sections": solution
                .sections
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "phase": s.phase,
                        "lines": s.lines.len(),
                    })
                })
                .collect::<Vec<_>>(),
        });

        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Solution OK: {}", path.display());
        println!();
        println!("  Projects: {}", solution.projects.len());
        for project in &solution.projects {
            if project.dependencies.is_empty() {
                println!("    {} ({})", project.name, project.relative_path);
            } else {
                println!(
                    "    {} ({}), {} dependencies",
                    project.name,
                    project.relative_path,
                    project.dependencies.len()
                );
            }
        }
        println!("  Global sections: {}", solution.sections.len());
        for section in &solution.sections {
            println!(
                "    {} ({}, {} lines)",
                section.name,
                section.phase,
                section.lines.len()
            );
        }
    }
}
