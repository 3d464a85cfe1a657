use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xrouter_cli::{Commands, GenerateArgs, execute};

fn manifests(dir: &Path) {
    fs::create_dir_all(dir.join("order")).unwrap();
    fs::write(
        dir.join("order/xrouter.json"),
        r#"{"module": "order", "routes": [{"path": "/order/detail", "target": "crate::OrderDetail"}]}"#,
    )
    .unwrap();
}

fn args(src: &Path, out: &Path) -> GenerateArgs {
    GenerateArgs {
        path: src.to_path_buf(),
        out: out.to_path_buf(),
        api_crate: None,
        config: None,
    }
}

#[test]
fn test_compile_then_check() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    manifests(src.path());

    let err = execute(Commands::Check(args(src.path(), out.path()))).unwrap_err();
    assert!(err.to_string().contains("out of date"));

    execute(Commands::Compile(args(src.path(), out.path()))).unwrap();
    assert!(out.path().join("order_router.rs").exists());
    assert!(out.path().join("xrouter_providers.rs").exists());

    execute(Commands::Check(args(src.path(), out.path()))).unwrap();

    fs::write(out.path().join("order_router.rs"), "// stale\n").unwrap();
    assert!(execute(Commands::Check(args(src.path(), out.path()))).is_err());
}

#[test]
fn test_compile_refuses_invalid_manifests() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(
        src.path().join("xrouter.json"),
        r#"{"module": "bad-name", "routes": [{"path": "/a", "target": "crate::A"}]}"#,
    )
    .unwrap();

    let err = execute(Commands::Compile(args(src.path(), out.path()))).unwrap_err();
    assert!(err.to_string().contains("error(s)"));
    assert!(!out.path().join("xrouter_providers.rs").exists());
}

#[test]
fn test_inspect_reads_without_writing() {
    let src = TempDir::new().unwrap();
    manifests(src.path());

    execute(Commands::Inspect {
        path: src.path().to_path_buf(),
    })
    .unwrap();

    let entries: Vec<_> = fs::read_dir(src.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
