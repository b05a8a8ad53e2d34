//! End-to-end merging over real files in a temporary tree.

use sln_merge::{
    combine_files, MergeOptions, Solution, SolutionError, TypeGuidPolicy, MERGED_TYPE_GUID,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GAME_GUID: &str = "7A19B9FA-11D3-43E2-9A1F-2D06CBF0B2AA";
const ENGINE_GUID: &str = "52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1";
const KARI_GUID: &str = "0C8A4012-9E2F-4D6A-B1F5-3E7C2F1A9B55";

const GAME_SLN: &str = concat!(
    "\n",
    "Microsoft Visual Studio Solution File, Format Version 11.00\n",
    "# Visual Studio 2010\n",
    "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Game\", \"Game\\Game.csproj\", \"{7A19B9FA-11D3-43E2-9A1F-2D06CBF0B2AA}\"\n",
    "\tProjectSection(ProjectDependencies) = postProject\n",
    "\t\t{52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1} = {52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1}\n",
    "\tEndProjectSection\n",
    "EndProject\n",
    "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Engine\", \"Engine\\Engine.csproj\", \"{52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1}\"\n",
    "EndProject\n",
    "Global\n",
    "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution\n",
    "\t\tDebug|x86 = Debug|x86\n",
    "\t\tRelease|x86 = Release|x86\n",
    "\tEndGlobalSection\n",
    "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\n",
    "\t\t{7A19B9FA-11D3-43E2-9A1F-2D06CBF0B2AA}.Debug|x86.ActiveCfg = Debug|x86\n",
    "\t\t{52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1}.Debug|x86.ActiveCfg = Debug|x86\n",
    "\tEndGlobalSection\n",
    "\tGlobalSection(SolutionProperties) = preSolution\n",
    "\t\tHideSolutionNode = FALSE\n",
    "\tEndGlobalSection\n",
    "\tGlobalSection(NestedProjects) = preSolution\n",
    "\t\t{52D1EA83-6D96-4B86-B3A1-9DE5A3A0F4C1} = {7A19B9FA-11D3-43E2-9A1F-2D06CBF0B2AA}\n",
    "\tEndGlobalSection\n",
    "EndGlobal\n",
);

const KARI_SLN: &str = concat!(
    "\n",
    "Microsoft Visual Studio Solution File, Format Version 11.00\n",
    "# Visual Studio 2010\n",
    "Project(\"{F184B08F-C81C-45F6-A57F-5ABD9991F28F}\") = \"Kari\", \"Kari.vbproj\", \"{0C8A4012-9E2F-4D6A-B1F5-3E7C2F1A9B55}\"\n",
    "EndProject\n",
    "Global\n",
    "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution\n",
    "\t\tRelease|x86 = Release|x86\n",
    "\t\tDebug|ARM = Debug|ARM\n",
    "\tEndGlobalSection\n",
    "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\n",
    "\t\t{0C8A4012-9E2F-4D6A-B1F5-3E7C2F1A9B55}.Debug|ARM.ActiveCfg = Debug|ARM\n",
    "\t\t{0C8A4012-9E2F-4D6A-B1F5-3E7C2F1A9B55}.Release|x86.ActiveCfg = Release|x86\n",
    "\tEndGlobalSection\n",
    "\tGlobalSection(SolutionProperties) = preSolution\n",
    "\t\tHideSolutionNode = FALSE\n",
    "\tEndGlobalSection\n",
    "EndGlobal\n",
);

fn write_solution(root: &Path, relative: &str, text: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, format!("\u{feff}{}", text)).unwrap();
    path
}

fn game_and_kari(root: &Path) -> Vec<PathBuf> {
    vec![
        write_solution(root, "Game/Game.sln", GAME_SLN),
        write_solution(root, "Kari/Kari.sln", KARI_SLN),
    ]
}

#[test]
fn test_merge_writes_master_with_rebased_paths() {
    let temp = TempDir::new().unwrap();
    let inputs = game_and_kari(temp.path());
    let output = temp.path().join("Master.sln");

    let merged = combine_files(&inputs, &output, &MergeOptions::default()).unwrap();
    assert_eq!(merged.projects.len(), 3);

    // The written file starts with a byte-order mark and parses back.
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with('\u{feff}'));
    let reread = Solution::from_file(&output).unwrap();

    let names: Vec<&str> = reread.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Game", "Engine", "Kari"]);

    let game_dir = temp.path().join("Game");
    let kari_dir = temp.path().join("Kari");
    assert_eq!(
        reread.projects[0].relative_path,
        game_dir.join("Game\\Game.csproj").to_string_lossy()
    );
    assert_eq!(
        reread.projects[2].relative_path,
        kari_dir.join("Kari.vbproj").to_string_lossy()
    );

    // Dependencies and the default type-GUID stamp survive the pipeline.
    assert_eq!(reread.projects[0].dependencies, vec![ENGINE_GUID.to_string()]);
    for project in &reread.projects {
        assert_eq!(project.type_guid, MERGED_TYPE_GUID);
    }
    assert_eq!(reread.projects[0].guid, GAME_GUID);
    assert_eq!(reread.projects[2].guid, KARI_GUID);
}

#[test]
fn test_merge_section_policies() {
    let temp = TempDir::new().unwrap();
    let inputs = game_and_kari(temp.path());
    let output = temp.path().join("Master.sln");

    let merged = combine_files(&inputs, &output, &MergeOptions::default()).unwrap();

    // Solution configurations: union of both files, deduplicated, sorted.
    let configurations = merged.section("SolutionConfigurationPlatforms").unwrap();
    assert_eq!(configurations.phase, "preSolution");
    assert_eq!(
        configurations.lines,
        vec![
            "\t\tDebug|ARM = Debug|ARM\n".to_string(),
            "\t\tDebug|x86 = Debug|x86\n".to_string(),
            "\t\tRelease|x86 = Release|x86\n".to_string(),
        ]
    );

    // Project configurations: both bodies, input order, no dedup.
    let project_configurations = merged.section("ProjectConfigurationPlatforms").unwrap();
    assert_eq!(project_configurations.phase, "postSolution");
    assert_eq!(project_configurations.lines.len(), 4);
    assert!(project_configurations.lines[0].contains(GAME_GUID));
    assert!(project_configurations.lines[3].contains(KARI_GUID));

    // Properties are rewritten, not copied.
    assert_eq!(
        merged.section("SolutionProperties").unwrap().lines,
        vec!["\t\tHideSolutionNode = FALSE\n".to_string()]
    );

    // A section only one input has passes through under its own name.
    let nested = merged.section("NestedProjects").unwrap();
    assert_eq!(nested.phase, "preSolution");
    assert_eq!(nested.lines.len(), 1);
}

#[test]
fn test_keep_types_policy_preserves_input_type_guids() {
    let temp = TempDir::new().unwrap();
    let inputs = game_and_kari(temp.path());
    let output = temp.path().join("Master.sln");

    let options = MergeOptions {
        type_guid: TypeGuidPolicy::Keep,
    };
    let merged = combine_files(&inputs, &output, &options).unwrap();
    assert_eq!(
        merged.projects[0].type_guid,
        "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC"
    );
    assert_eq!(
        merged.projects[2].type_guid,
        "F184B08F-C81C-45F6-A57F-5ABD9991F28F"
    );
}

#[test]
fn test_malformed_input_leaves_no_output() {
    let temp = TempDir::new().unwrap();
    let good = write_solution(temp.path(), "Game/Game.sln", GAME_SLN);
    // Truncated inside the global block.
    let broken = write_solution(
        temp.path(),
        "Broken/Broken.sln",
        "\nGlobal\n\tGlobalSection(SolutionProperties) = preSolution\n",
    );
    let output = temp.path().join("Master.sln");

    let result = combine_files(&[good, broken.clone()], &output, &MergeOptions::default());
    match result {
        Err(SolutionError::Malformed { path, .. }) => assert_eq!(path, broken),
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_duplicate_guid_across_inputs_rejected() {
    let temp = TempDir::new().unwrap();
    let first = write_solution(temp.path(), "A/A.sln", GAME_SLN);
    let second = write_solution(temp.path(), "B/B.sln", GAME_SLN);
    let output = temp.path().join("Master.sln");

    let result = combine_files(&[first.clone(), second.clone()], &output, &MergeOptions::default());
    match result {
        Err(SolutionError::DuplicateProjectGuid { guid, first: a, second: b }) => {
            assert_eq!(guid, GAME_GUID);
            assert_eq!(a, first);
            assert_eq!(b, second);
        }
        other => panic!("expected a duplicate GUID error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let absent = temp.path().join("absent.sln");
    let output = temp.path().join("Master.sln");

    match combine_files(&[absent.clone()], &output, &MergeOptions::default()) {
        Err(SolutionError::Io { path, .. }) => assert_eq!(path, absent),
        other => panic!("expected an I/O error, got {:?}", other),
    }
    assert!(!output.exists());
}
