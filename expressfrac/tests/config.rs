mod test_utils;

use std::path::PathBuf;

use expressfrac::*;
use test_utils::*;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("expressfrac_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

const STAGED_JSON: &str = r#"{
    "MeshProperties": { "xmax": 50.0, "nx": 50 },
    "ReservoirProperties": {
        "PayZoneHeight": 20.0,
        "YoungModulus": 2e9,
        "PoissonRatio": 0.3,
        "Toughness": 5e6,
        "LeakoffCoefficient": 1e-5
    },
    "PumpingSchedule": { "Schedule": [0, 10, 20], "Flowrate": [0.05, 0.1] },
    "SolverSettings": {
        "TimeStep": 5,
        "FrontTolerance": 1e-4,
        "FrontMaxIter": 200,
        "FrontRelaxationCoeff": 0.7
    }
}"#;

const SMALL_RON: &str = r#"(
    CaseName: "small",
    MeshProperties: (xmax: 50.0, nx: 50),
    ReservoirProperties: (
        PayZoneHeight: 20.0,
        YoungModulus: 2e9,
        PoissonRatio: 0.3,
        Toughness: 5e6,
        LeakoffCoefficient: 0.0,
    ),
    PumpingSchedule: (Duration: 20.0, Flowrate: 0.05),
    SolverSettings: (
        TimeStep: 5.0,
        FrontTolerance: 1e-4,
        FrontMaxIter: 200,
        FrontRelaxationCoeff: 0.7,
    ),
)"#;

#[test]
fn staged_schedule_and_default_case_name() -> Result<(), LoadConfigError> {
    let config: Config = serde_json::from_str(STAGED_JSON)?;
    assert_eq!(config.case_name, "case");
    assert_eq!(
        config.pumping_schedule,
        PumpingScheduleConfig::Staged {
            schedule: vec![0.0, 10.0, 20.0],
            flowrate: vec![0.05, 0.1],
        }
    );
    let schedule = config.schedule()?;
    assert_eq!(schedule.time_end(), 20.0);
    assert_eq!(schedule.flowrate_at(15.0), 0.1);
    assert_eq!(config.solver_params().max_iterations, 200);
    Ok(())
}

#[test]
fn missing_key_is_a_parse_error() {
    let broken = STAGED_JSON.replace("\"Toughness\": 5e6,", "");
    assert!(serde_json::from_str::<Config>(&broken).is_err());
}

#[test]
fn load_json_and_ron() -> Result<(), LoadConfigError> {
    let json = write_temp("reference.json", REFERENCE_CONFIG_JSON);
    assert_eq!(load_config(&json)?, reference_config());

    let ron = write_temp("small.ron", SMALL_RON);
    assert_eq!(load_config(&ron)?, small_config());

    let _ = std::fs::remove_file(json);
    let _ = std::fs::remove_file(ron);
    Ok(())
}

#[test]
fn load_errors() {
    let yaml = write_temp("config.yaml", "MeshProperties: {}");
    assert!(matches!(
        load_config(&yaml),
        Err(LoadConfigError::UnsupportedFormat(_))
    ));
    let _ = std::fs::remove_file(yaml);

    assert!(matches!(
        load_config(std::env::temp_dir().join("expressfrac_missing.json")),
        Err(LoadConfigError::IO(_))
    ));

    let bad = write_temp("bad.json", "{ not json");
    assert!(matches!(load_config(&bad), Err(LoadConfigError::Json(_))));
    let _ = std::fs::remove_file(bad);
}

#[test]
fn runner_from_path() {
    init_logger();
    let path = write_temp("staged.json", STAGED_JSON);
    let mut runner = Runner::from_path(&path).unwrap();
    let mut reports: Vec<StepReport> = Vec::new();
    runner.solve(&mut reports).unwrap();
    check_history(&reports, 20.0);

    let invalid = STAGED_JSON.replace("\"FrontRelaxationCoeff\": 0.7", "\"FrontRelaxationCoeff\": 1.5");
    let invalid_path = write_temp("invalid.json", &invalid);
    assert!(matches!(
        Runner::from_path(&invalid_path),
        Err(LoadConfigError::Invalid(Error::InvalidParameter { name })) if name == "FrontRelaxationCoeff"
    ));

    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(invalid_path);
}
