use cscrub_core::{CoreError, Outcome, ProcessOptions, Report, process_tree};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

fn run(root: &Path) -> (Report, Vec<String>) {
    let lines = Mutex::new(Vec::new());
    let report = process_tree(root, &[], &ProcessOptions::default(), |f| {
        let name = f.path.file_name().unwrap().to_string_lossy().into_owned();
        lines.lock().unwrap().push(name);
    })
    .unwrap();
    (report, lines.into_inner().unwrap())
}

#[test]
fn only_cpp_and_h_are_examined() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for name in ["a.cpp", "b.h", "c.hpp", "d.txt"] {
        fs::write(root.join(name), "int x; // c\n").unwrap();
    }

    let (report, seen) = run(root);

    assert_eq!(report.examined(), 2);
    assert_eq!(seen, vec!["a.cpp", "b.h"]);
    assert_eq!(fs::read_to_string(root.join("a.cpp")).unwrap(), "int x;\n");
    assert_eq!(fs::read_to_string(root.join("b.h")).unwrap(), "int x;\n");
    assert_eq!(
        fs::read_to_string(root.join("c.hpp")).unwrap(),
        "int x; // c\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("d.txt")).unwrap(),
        "int x; // c\n"
    );
}

#[test]
fn nested_tree_mixed_outcomes() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("include/detail")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("include/api.h"), "#pragma once\n\nvoid f();\n").unwrap();
    fs::write(
        root.join("include/detail/impl.h"),
        "/* impl */\nvoid g();   \n\n\n\nvoid h();",
    )
    .unwrap();
    fs::write(
        root.join("src/main.cpp"),
        "int main() {\n    // entry\n    return 0;\n}\n",
    )
    .unwrap();

    let (report, seen) = run(root);

    assert_eq!(report.examined(), 3);
    assert_eq!(seen, vec!["api.h", "impl.h", "main.cpp"]);
    assert_eq!(report.cleaned(), 2);
    assert_eq!(report.unchanged(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.files[0].outcome, Outcome::Unchanged);

    assert_eq!(
        fs::read_to_string(root.join("include/detail/impl.h")).unwrap(),
        "void g();\n\nvoid h();\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/main.cpp")).unwrap(),
        "int main() {\n\n    return 0;\n}\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.cpp"), "/* a */ int a; // b\n\n\n\nint c;  \n").unwrap();
    fs::write(root.join("b.h"), "// only a comment\n").unwrap();

    let (first, _) = run(root);
    assert_eq!(first.cleaned(), 2);

    let (second, _) = run(root);
    assert_eq!(second.examined(), 2);
    assert_eq!(second.unchanged(), 2);
}

#[cfg(unix)]
#[test]
fn unreadable_file_does_not_stop_the_walk() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.cpp"), "int a; // x\n").unwrap();
    std::os::unix::fs::symlink(root.join("missing-target"), root.join("b.cpp")).unwrap();
    fs::write(root.join("c.h"), "int c;\n").unwrap();

    let (report, seen) = run(root);

    assert_eq!(report.examined(), 3);
    assert_eq!(seen, vec!["a.cpp", "b.cpp", "c.h"]);
    assert_eq!(report.files[0].outcome, Outcome::Cleaned);
    assert!(matches!(report.files[1].outcome, Outcome::Failed(_)));
    assert_eq!(report.files[2].outcome, Outcome::Unchanged);
    assert_eq!(report.failed(), 1);
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.cpp"), "int a; // x\n").unwrap();

    let options = ProcessOptions {
        dry_run: true,
        ..ProcessOptions::default()
    };
    let report = process_tree(root, &[], &options, |_| {}).unwrap();

    assert_eq!(report.files[0].outcome, Outcome::WouldClean);
    assert_eq!(
        fs::read_to_string(root.join("a.cpp")).unwrap(),
        "int a; // x\n"
    );
}

#[test]
fn excluded_directories_are_not_examined() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("vendor")).unwrap();
    fs::write(root.join("a.cpp"), "int a;\n").unwrap();
    fs::write(root.join("vendor/v.h"), "// keep me\n").unwrap();

    let report = process_tree(
        root,
        &["vendor".to_string()],
        &ProcessOptions::default(),
        |_| {},
    )
    .unwrap();

    assert_eq!(report.examined(), 1);
    assert_eq!(
        fs::read_to_string(root.join("vendor/v.h")).unwrap(),
        "// keep me\n"
    );
}

#[test]
fn empty_directory_examines_nothing() {
    let dir = TempDir::new().unwrap();
    let (report, seen) = run(dir.path());
    assert_eq!(report.examined(), 0);
    assert!(seen.is_empty());
}

#[test]
fn missing_root_is_reported() {
    let dir = TempDir::new().unwrap();
    let result = process_tree(
        &dir.path().join("absent"),
        &[],
        &ProcessOptions::default(),
        |_| {},
    );
    assert!(matches!(result, Err(CoreError::RootNotFound(_))));
}

#[test]
fn crlf_sources_follow_text_mode_reading() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let clean = b"#include \"image.h\"\r\n\r\nint main() {\r\n    return 0;\r\n}\r\n";
    fs::write(root.join("clean.cpp"), clean).unwrap();
    fs::write(
        root.join("dirty.h"),
        "/* header */\r\nvoid f();  \r\n\r\n\r\nvoid g(); // todo\r\n",
    )
    .unwrap();

    let (report, seen) = run(root);

    assert_eq!(seen, vec!["clean.cpp", "dirty.h"]);
    assert_eq!(report.files[0].outcome, Outcome::Unchanged);
    assert_eq!(report.files[1].outcome, Outcome::Cleaned);
    assert_eq!(fs::read(root.join("clean.cpp")).unwrap(), clean);
    assert_eq!(
        fs::read_to_string(root.join("dirty.h")).unwrap(),
        "void f();\n\nvoid g();\n"
    );

    let (again, _) = run(root);
    assert_eq!(again.unchanged(), 2);
}
