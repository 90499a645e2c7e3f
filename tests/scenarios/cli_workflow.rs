//! Scenario: CLI Workflow
//!
//! Journey: a developer drives an external compiler through `summon`.
//!
//! Steps:
//! 1. Project has `summon.toml`, a `sources/` tree and a shell compiler
//! 2. `summon resolve` fetches from `sources/` and compiles on demand
//! 3. Artifacts persist in `.summon/artifacts` between runs
//! 4. `summon compile` skips what is already there
//!
//! Success Criteria:
//! - The compiler runs once per missing unit across invocations
//! - Failures exit non-zero with the compiler's diagnostics

#![cfg(unix)]

use std::fs;

use crate::common::*;

fn setup() -> (TestEnv, std::path::PathBuf) {
    let env = TestEnv::new();
    let compiler = install_shell_compiler(env.project_root.path());
    env.write("summon.toml", &project_config(&compiler));
    env.write("sources/remote/A.src", "unit remote/A\nunit remote/B\n");
    env.write("sources/remote/Broken.src", "fail\n");
    (env, compiler)
}

/// SCENARIO: resolve, then resolve a sibling, then check existence
#[test]
fn scenario_resolve_persists_between_runs() {
    let (env, compiler) = setup();

    let result = env.run(&["resolve", "remote/A", "--output", "A.bin"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(fs::read(env.path("A.bin")).unwrap(), b"bin:remote/A");
    assert_eq!(compiler_calls(&compiler), 1);

    // B came out of the same compile and was persisted
    let result = env.run(&["exists", "remote/B"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("remote/B: compiled"));

    let result = env.run(&["resolve", "remote/B"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(compiler_calls(&compiler), 1);
    assert_eq!(
        compiler_processor_args(&compiler),
        vec!["platform.Builtin".to_string()]
    );
}

/// SCENARIO: a dot-separated name survives the persistent store
#[test]
fn scenario_dotted_name_persists_between_runs() {
    let (env, compiler) = setup();
    let config = project_config(&compiler)
        .replace(r#"remote = ["remote/"]"#, r#"remote = ["remote/", "remote."]"#);
    env.write("summon.toml", &config);
    env.write("sources/remote/algo/Sort.src", "unit remote.algo.Sort\n");

    let result = env.run(&["resolve", "remote.algo.Sort"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert!(env.path(".summon/artifacts/remote/algo/Sort.bin").exists());

    let result = env.run(&["exists", "remote.algo.Sort"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("remote.algo.Sort: compiled"));

    let result = env.run(&["resolve", "remote.algo.Sort"]);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(compiler_calls(&compiler), 1);
}

/// SCENARIO: a unit that does not compile
#[test]
fn scenario_resolve_failure_exits_non_zero() {
    let (env, compiler) = setup();

    let result = env.run(&["resolve", "remote/Broken"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("compilation failed for [remote/Broken]"));
    assert_eq!(compiler_calls(&compiler), 1);
    assert!(!env.path(".summon/artifacts/remote/Broken.bin").exists());
}

/// SCENARIO: names outside the namespace are never fetched
#[test]
fn scenario_resolve_outside_namespace_is_absent() {
    let (env, compiler) = setup();
    env.write("sources/local/Main.src", "unit local/Main\n");

    let result = env.run(&["resolve", "local/Main"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("could not be fetched"));
    assert_eq!(compiler_calls(&compiler), 0);
}

/// SCENARIO: compile local files twice, second run is a no-op
#[test]
fn scenario_compile_files_is_idempotent() {
    let (env, compiler) = setup();
    env.write("app/Main.src", "unit app/Main\n");
    env.write("app/Util.src", "unit app/Util\nprocessor app/gen/Tool\n");

    let args = ["compile", "app/Main.src", "app/Util.src", "--out-dir", "out"];
    let result = env.run(&args);
    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(fs::read(env.path("out/app/Main.bin")).unwrap(), b"bin:app/Main");
    assert!(fs::read_to_string(env.path("out/PROCESSORS"))
        .unwrap()
        .contains("app/gen/Tool"));

    let result = env.run(&args);
    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("Nothing to compile"));
    assert_eq!(compiler_calls(&compiler), 1);
}

/// SCENARIO: JSON mode reports the compile and streams engine events
#[test]
fn scenario_json_compile_reports_and_streams_events() {
    let (env, _compiler) = setup();
    env.write("app/Main.src", "unit app/Main\n");

    let result = env.run(&["--json", "compile", "app/Main.src"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let report = &result.json_lines()[0];
    assert_eq!(report["event"], "compiled");
    assert_eq!(report["submitted"][0], "app/Main");
    assert_eq!(report["persisted"], 1);

    let kinds: Vec<String> = result
        .json_events()
        .iter()
        .map(|e| e["event"].as_str().unwrap().to_string())
        .collect();
    assert!(kinds.contains(&"compile_start".to_string()));
    assert!(kinds.contains(&"compiled".to_string()));
}

/// SCENARIO: config mistakes are reported, env overrides apply
#[test]
fn scenario_check_config_reports_unknown_keys() {
    let (env, compiler) = setup();
    env.write(
        "summon.toml",
        &format!("{}\n[limits]\nfetch_timout_ms = 5\n", project_config(&compiler)),
    );

    let result = env.run_with_env(&["check-config"], &[("SUMMON_COMPILE_TIMEOUT_MS", "900")]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result
        .stderr
        .contains("unknown key 'fetch_timout_ms'"));
    assert!(result.stderr.contains("did you mean 'fetch_timeout_ms'?"));
    assert!(result.stdout.contains("compile_timeout_ms = 900"));
}

/// SCENARIO: no backend configured
#[test]
fn scenario_missing_backend_is_a_clear_error() {
    let env = TestEnv::new();
    env.write("summon.toml", "[namespace]\nremote = [\"remote/\"]\n");

    let result = env.run(&["resolve", "remote/A"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("no backend configured"));
}
