use crate::{Config, MeshProperties, PumpingScheduleConfig, ReservoirProperties, SolverSettings};

/*
 * Setup code
 */

pub const REFERENCE_RESERVOIR: ReservoirProperties = ReservoirProperties {
    pay_zone_height: 20.0,
    young_modulus: 2e9,
    poisson_ratio: 0.3,
    toughness: 5e6,
    leakoff_coefficient: 0.0,
};

pub const REFERENCE_SETTINGS: SolverSettings = SolverSettings {
    time_step: 5.0,
    front_tolerance: 1e-4,
    front_max_iter: 200,
    front_relaxation_coeff: 0.7,
};

/// 100 m mesh with 200 cells pumped at 0.05 m³/s for 700 s.
pub fn reference_config() -> Config {
    Config {
        case_name: String::from("reference"),
        mesh_properties: MeshProperties {
            xmax: 100.0,
            nx: 200,
        },
        reservoir_properties: REFERENCE_RESERVOIR,
        pumping_schedule: PumpingScheduleConfig::Constant {
            duration: 700.0,
            flowrate: 0.05,
        },
        solver_settings: REFERENCE_SETTINGS,
    }
}

/// Coarse variant of the reference case with unit cells and four 5 s steps.
pub fn small_config() -> Config {
    Config {
        case_name: String::from("small"),
        mesh_properties: MeshProperties { xmax: 50.0, nx: 50 },
        pumping_schedule: PumpingScheduleConfig::Constant {
            duration: 20.0,
            flowrate: 0.05,
        },
        ..reference_config()
    }
}

pub const REFERENCE_CONFIG_JSON: &str = r#"{
    "CaseName": "reference",
    "MeshProperties": { "xmax": 100.0, "nx": 200 },
    "ReservoirProperties": {
        "PayZoneHeight": 20.0,
        "YoungModulus": 2e9,
        "PoissonRatio": 0.3,
        "Toughness": 5e6,
        "LeakoffCoefficient": 0.0
    },
    "PumpingSchedule": { "Duration": 700, "Flowrate": 0.05 },
    "SolverSettings": {
        "TimeStep": 5,
        "FrontTolerance": 1e-4,
        "FrontMaxIter": 200,
        "FrontRelaxationCoeff": 0.7
    }
}"#;
