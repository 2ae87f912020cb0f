//! End-to-end tests for the generator command

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use protogen::cli::ExitCode;
use protogen::cli::commands::generate_protos;
use protogen::{GenConfig, GenError, run};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_temp_dir() -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let pid = std::process::id();
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("protogen_test_{}_{pid}_{id}", ts));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_writes_output_next_to_first_input() {
    let dir = unique_temp_dir();
    let other = dir.join("other");
    fs::create_dir_all(&other).unwrap();
    let a = write_file(&dir, "impl_a.c", "value_t fun_Foo_bar(devs_ctx_t *ctx, value_t self, value_t x) {\n}\n");
    let b = write_file(&other, "impl_b.c", "void prop_Buf_len(devs_ctx_t *ctx, value_t x) {\n}\n");

    assert_eq!(generate_protos(&[a, b]).unwrap(), ExitCode::SUCCESS);

    let out = fs::read_to_string(dir.join("protogen.c")).unwrap();
    assert!(!other.join("protogen.c").exists());
    assert!(out.contains("static const devs_builtin_proto_entry_t Foo_prototype_entries[] = {"));
    assert!(out.contains("{DEVS_BUILTIN_STRING_BAR, 1, 0, (void *)fun_Foo_bar},"));
    assert!(out.contains("{DEVS_BUILTIN_STRING_LEN, 1, ASYNC | PROP | NO_SELF, (void *)prop_Buf_len},"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_bad_first_param_fails_without_output() {
    let dir = unique_temp_dir();
    let a = write_file(&dir, "impl_a.c", "value_t fun_Foo_bar(value_t self) {\n}\n");

    let err = generate_protos(&[a.clone()]).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains(&format!("{}:1: first arg should be ctx", a.display())));
    assert!(!dir.join("protogen.c").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unsupported_return_fails() {
    let dir = unique_temp_dir();
    let a = write_file(&dir, "impl_a.c", "int fun_Foo_bar(devs_ctx_t *ctx)\n");

    let err = generate_protos(&[a]).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
    assert!(err.message.contains("only void and value_t supported as return"));
    assert!(!dir.join("protogen.c").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_errors_surface_from_every_file() {
    let dir = unique_temp_dir();
    let broken = fs::read_to_string("tests/fixtures/invalid/impl_broken.c").unwrap();
    let a = write_file(&dir, "impl_broken.c", &broken);
    let b = write_file(&dir, "impl_more.c", "value_t fun_Bar_x(devs_ctx_t *ctx, int y)\n");

    let err = run(&[a, b], &GenConfig::default()).unwrap_err();
    let GenError::Invalid { diagnostics, output } = err else {
        panic!("expected declaration errors");
    };
    let found: Vec<(String, usize, String)> = diagnostics
        .iter()
        .map(|d| {
            let file = Path::new(&d.file).file_name().unwrap().to_string_lossy().into_owned();
            (file, d.line, d.error.to_string())
        })
        .collect();
    assert_eq!(
        found,
        vec![
            ("impl_broken.c".to_string(), 7, "only void and value_t supported as return".to_string()),
            ("impl_broken.c".to_string(), 11, "first arg should be ctx".to_string()),
            ("impl_broken.c".to_string(), 15, "invalid param const char *name".to_string()),
            ("impl_more.c".to_string(), 1, "invalid param int y".to_string()),
        ]
    );
    assert_eq!(output, dir.join("protogen.c"));
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = unique_temp_dir();
    let previous = write_file(&dir, "protogen.c", "// previous\n");
    let a = write_file(&dir, "impl_a.c", "value_t fun_Foo_bar(int ctx)\n");

    assert!(generate_protos(&[a]).is_err());
    assert_eq!(fs::read_to_string(&previous).unwrap(), "// previous\n");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_same_method_under_same_key_is_kept_twice() {
    let dir = unique_temp_dir();
    let a = write_file(&dir, "impl_a.c", "value_t fun_Foo_bar(devs_ctx_t *ctx)\n");
    let b = write_file(&dir, "impl_b.c", "value_t prop_Foo_bar(devs_ctx_t *ctx)\n");

    let out_path = run(&[a, b], &GenConfig::default()).unwrap();
    let out = fs::read_to_string(out_path).unwrap();
    assert!(out.contains(
        "static const devs_builtin_proto_entry_t Foo_entries[] = {\n    \
         {DEVS_BUILTIN_STRING_BAR, 50000},\n    \
         {DEVS_BUILTIN_STRING_BAR, 50001},\n    \
         {0, 0},\n};\n"
    ));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = unique_temp_dir();
    let a = write_file(&dir, "impl_a.c", "value_t fun_Foo_bar(devs_ctx_t *ctx, value_t self, value_t x)\n");

    let out_path = run(&[a.clone()], &GenConfig::default()).unwrap();
    let first = fs::read(&out_path).unwrap();
    run(&[a], &GenConfig::default()).unwrap();
    let second = fs::read(&out_path).unwrap();
    assert_eq!(first, second);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_non_utf8_comment_does_not_stop_the_scan() {
    let dir = unique_temp_dir();
    let a = dir.join("impl_a.c");
    let mut bytes = b"// Copyright \xa9 2022\n".to_vec();
    bytes.extend_from_slice(b"value_t fun_Foo_bar(devs_ctx_t *ctx, value_t self, value_t x)\n");
    fs::write(&a, bytes).unwrap();

    let out_path = run(&[a], &GenConfig::default()).unwrap();
    let out = fs::read_to_string(out_path).unwrap();
    assert!(out.contains("{DEVS_BUILTIN_STRING_BAR, 1, 0, (void *)fun_Foo_bar},"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_id_overflow_is_reported_not_panicked() {
    let dir = unique_temp_dir();
    let a = write_file(
        &dir,
        "impl_a.c",
        "value_t fun_Foo_a(devs_ctx_t *ctx)\nvalue_t fun_Foo_b(devs_ctx_t *ctx)\n",
    );

    let config = GenConfig::new().with_first_builtin_function(u32::MAX);
    let err = run(&[a], &config).unwrap_err();
    let GenError::Invalid { diagnostics, output } = err else {
        panic!("expected declaration errors");
    };
    let found: Vec<(usize, String)> = diagnostics.iter().map(|d| (d.line, d.error.to_string())).collect();
    assert_eq!(found, vec![(2, format!("builtin ID overflows u32 (first ID {})", u32::MAX))]);
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_no_inputs_is_an_error() {
    assert!(matches!(run(&[], &GenConfig::default()), Err(GenError::NoInputs)));
}
