use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

fn src(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(path)
}

#[test]
fn view_state_is_renderer_agnostic() {
    let content = fs::read_to_string(src("view.rs")).unwrap();
    let violations: Vec<&str> = ["ratatui", "crossterm", "tokio", "crate::ui", "crate::bridge"]
        .into_iter()
        .filter(|forbidden| content.contains(forbidden))
        .collect();

    assert!(
        violations.is_empty(),
        "src/view.rs imports forbidden dependencies: {violations:?}"
    );
}

#[test]
fn ui_never_reaches_a_concrete_backend() {
    let mut violations = Vec::new();

    for file in rs_files(&src("ui")) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in [
            "crate::bridge::local",
            "crate::bridge::json_file",
            "SysinfoBackend",
            "JsonFileBackend",
            "crate::system::collector",
            "sysinfo::",
        ] {
            if content.contains(forbidden) {
                violations.push(format!("{} references `{}`", rel(&file), forbidden));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI/backend boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn sysinfo_is_scoped_to_system_and_bridge() {
    let mut violations = Vec::new();

    for file in rs_files(&src("")) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        if !content.contains("sysinfo::") {
            continue;
        }
        let rel_path = rel(&file);
        let allowed = rel_path.starts_with("src/system/") || rel_path.starts_with("src/bridge/");
        if !allowed {
            violations.push(format!("{rel_path} uses sysinfo outside system/bridge"));
        }
    }

    assert!(
        violations.is_empty(),
        "Unexpected sysinfo usage:\n{}",
        violations.join("\n")
    );
}
