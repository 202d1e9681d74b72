//! End-to-end runs of the headless CLI against files on disk.

use std::io::Write;

use clap::Parser;
use tilemorph::cli::{Cli, run};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tilemorph").chain(args.iter().copied())).unwrap()
}

#[test]
fn csv_file_with_config_prints_json() {
    let dir = tempfile::tempdir().unwrap();

    let data = dir.path().join("people.csv");
    let mut file = std::fs::File::create(&data).unwrap();
    writeln!(file, "\"Name\",\"Country\",\"Interest\",\"Photo\"").unwrap();
    writeln!(file, "Ada,UK,\"engines, looms\",ada.png").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "Grace,US,compilers,").unwrap();

    let config = dir.path().join("scene.toml");
    std::fs::write(&config, "transition_ms = 100\nseed = 9\ninitial_arrangement = \"grid\"\n")
        .unwrap();

    let cli = parse(&[
        "--data",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--step-ms",
        "50",
        "--frames",
        "20",
        "--json",
    ]);
    let mut out = Vec::new();
    run(&cli, &mut out).unwrap();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["tiles"], 2);
    assert_eq!(report["arrangement"], "grid");
    assert_eq!(report["settled"], true);
    assert_eq!(report["poses"][0]["title"], "Ada");
    assert_eq!(report["poses"][1]["title"], "Grace");
    assert_eq!(report["poses"][1]["position"]["x"], -400.0);
    assert_eq!(report["poses"][1]["position"]["z"], -4500.0);
}

#[test]
fn missing_data_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let cli = parse(&["--data", missing.to_str().unwrap()]);
    let err = run(&cli, &mut Vec::new()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("nope.csv"), "{err}");
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("scene.json");
    std::fs::write(&config, r#"{ "transition_ms": -5 }"#).unwrap();
    let cli = parse(&["--tiles", "2", "--config", config.to_str().unwrap()]);
    let err = run(&cli, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, tilemorph::CliError::Config(_)));
}
