//! Integration tests for the rendering collaborator: engine output composed
//! into a complete Dockerfile, preamble intact, terminal-command fallback
//! applied only when needed.

use basewright::{dockerfile, Engine, FileSnapshot, LanguageId};
use std::fs;

const PREAMBLE_TOOLS: &[&str] = &["git", "build-essential", "bash", "sudo", "curl", "ca-certificates"];

#[test]
fn python_requirements_repo_end_to_end() {
    let engine = Engine::new();
    let snapshot = FileSnapshot::from_files([
        (".python-version", "3.10\n"),
        ("requirements.txt", "flask==3.0\n"),
    ]);
    let env = engine.resolve(LanguageId::Python, &snapshot);

    let text = dockerfile::render(
        &env.image_tag,
        &env.instructions,
        "flask",
        "https://github.com/pallets/flask",
    );

    assert!(text.starts_with("FROM python:3.10-slim\n"));
    for tool in PREAMBLE_TOOLS {
        assert!(text.contains(tool), "preamble must install {}", tool);
    }
    assert!(text.contains("RUN git clone https://github.com/pallets/flask flask"));
    assert!(text.contains("WORKDIR /working_directory/testbed/flask"));
    assert!(text.contains("RUN pip install --no-cache-dir -r requirements.txt"));
    // Python's template has no terminal command, so the shell fallback lands.
    assert!(text.ends_with("CMD [\"/bin/bash\"]"));
}

#[test]
fn rust_repo_keeps_its_own_terminal_command() {
    let engine = Engine::new();
    let snapshot = FileSnapshot::from_files([(
        "Cargo.toml",
        "[package]\nname = \"server\"\nversion = \"0.1.0\"\n",
    )]);
    let env = engine.resolve(LanguageId::Rust, &snapshot);

    let text = dockerfile::render(
        &env.image_tag,
        &env.instructions,
        "server",
        "https://github.com/owner/server",
    );

    assert!(text.ends_with("CMD [\"./target/release/server\"]"));
    assert!(!text.contains("CMD [\"/bin/bash\"]"));
    // Two-phase build: dummy main, dependency build, then the real build.
    let dummy = text.find("echo 'fn main() {}' > src/main.rs").unwrap();
    let copy_all = text.find("COPY . .").unwrap();
    assert!(dummy < copy_all);
    assert_eq!(text.matches("RUN cargo build --release").count(), 2);
}

#[test]
fn rendering_is_deterministic() {
    let engine = Engine::new();
    let snapshot = FileSnapshot::from_files([("package.json", "{}"), ("yarn.lock", "")]);
    let env = engine.resolve(LanguageId::JavaScript, &snapshot);

    let a = dockerfile::render(&env.image_tag, &env.instructions, "app", "url");
    let b = dockerfile::render(&env.image_tag, &env.instructions, "app", "url");
    assert_eq!(a, b);
}

#[test]
fn write_round_trip() {
    let engine = Engine::new();
    let snapshot = FileSnapshot::from_files([("go.mod", "go 1.21\n")]);
    let env = engine.resolve(LanguageId::Go, &snapshot);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dockerfile");
    let written = dockerfile::write(
        &env.image_tag,
        &env.instructions,
        "demo",
        "https://github.com/owner/demo",
        &path,
    )
    .unwrap();

    let content = fs::read_to_string(written).unwrap();
    assert_eq!(
        content,
        dockerfile::render(
            &env.image_tag,
            &env.instructions,
            "demo",
            "https://github.com/owner/demo",
        )
    );
}
