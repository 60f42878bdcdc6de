use std::process::Command;

#[derive(Debug)]
struct Report {
    charge: f64,
    percent: f64,
    clamp_events: f64,
}

#[test]
fn presets_run_via_cli_and_report_pack_figures() {
    let series = run_and_parse(&["--preset", "series", "--quiet"]);
    let parallel = run_and_parse(&["--preset", "parallel", "--quiet"]);

    assert!((series.charge - 300.0).abs() < 1e-6, "series={series:?}");
    assert!((parallel.charge - 1500.0).abs() < 1e-6, "parallel={parallel:?}");
    assert!((series.percent - 30.0).abs() < 1e-6, "series={series:?}");
    assert!((parallel.percent - 50.0).abs() < 1e-6, "parallel={parallel:?}");
    assert_eq!(series.clamp_events, 1.0);
}

#[test]
fn drain_scenario_reports_clamps() {
    let drain = run_and_parse(&["--scenario", "scenarios/drain.toml"]);
    // both cells run empty, then both overfill
    assert_eq!(drain.clamp_events, 4.0);
    assert!((drain.percent - 100.0).abs() < 1e-6, "drain={drain:?}");
}

#[test]
fn invalid_hours_override_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_pack-sim"))
        .args(["--preset", "demo", "--hours", "500"])
        .output()
        .expect("pack-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.default_hours"), "stderr={stderr}");
}

#[test]
fn unknown_preset_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_pack-sim"))
        .args(["--preset", "bogus"])
        .output()
        .expect("pack-sim process should run");
    assert!(!output.status.success());
}

fn run_and_parse(args: &[&str]) -> Report {
    let output = Command::new(env!("CARGO_BIN_EXE_pack-sim"))
        .args(args)
        .output()
        .expect("pack-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Report {
        charge: parse_metric(&stdout, "Pack Charge:", ""),
        percent: parse_metric(&stdout, "Pack Percent:", "%"),
        clamp_events: parse_metric(&stdout, "Clamp events:", ""),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from report line `{line}`"))
}
