use kernelreg_core::{discover_environments, KernelLayout};
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_root_yields_empty_list() {
    let scratch = TempDir::new().unwrap();
    let missing = scratch.path().join("no-envs-here");

    let environments = discover_environments(&missing).unwrap();
    assert!(environments.is_empty());
}

#[test]
fn empty_root_yields_empty_list() {
    let envs_root = TempDir::new().unwrap();

    let environments = discover_environments(envs_root.path()).unwrap();
    assert!(environments.is_empty());
}

#[test]
fn lists_only_plausible_environment_directories() {
    let envs_root = TempDir::new().unwrap();
    fs::create_dir(envs_root.path().join("good")).unwrap();
    fs::create_dir(envs_root.path().join(".hidden")).unwrap();
    fs::create_dir(envs_root.path().join("bad name")).unwrap();
    fs::write(envs_root.path().join("environments.txt"), b"not a dir").unwrap();

    let environments = discover_environments(envs_root.path()).unwrap();

    let names: Vec<&str> = environments.iter().map(|env| env.name.as_str()).collect();
    assert_eq!(names, vec!["good"]);
}

#[test]
fn results_are_sorted_by_name() {
    let envs_root = TempDir::new().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        fs::create_dir(envs_root.path().join(name)).unwrap();
    }

    let environments = discover_environments(envs_root.path()).unwrap();

    let names: Vec<&str> = environments.iter().map(|env| env.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn discovered_environment_carries_directory_and_interpreter_path() {
    let envs_root = TempDir::new().unwrap();
    fs::create_dir(envs_root.path().join("sci")).unwrap();

    let environments = discover_environments(envs_root.path()).unwrap();
    assert_eq!(environments.len(), 1);

    let env = &environments[0];
    assert_eq!(env.name, "sci");
    assert_eq!(env.dir, envs_root.path().join("sci"));
    assert_eq!(
        env.interpreter_path(&KernelLayout::default()),
        envs_root.path().join("sci/bin/python")
    );
}
