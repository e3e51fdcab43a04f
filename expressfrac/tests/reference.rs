mod test_utils;

use approx::*;
use expressfrac::*;
use test_utils::*;

#[test]
fn reference_case() -> Result<(), Error> {
    init_logger();
    let mut runner = Runner::new(&reference_config())?;
    let mut reports: Vec<StepReport> = Vec::new();
    let last = runner.solve(&mut reports)?;

    assert_eq!(reports.len(), 140);
    assert_eq!(runner.notifications(), 140);
    check_history(&reports, 700.0);

    for (k, report) in reports.iter().enumerate() {
        let summary = &report.summary;
        assert_relative_eq!(summary.time, 5.0 * (k + 1) as f64, max_relative = 1e-12);
        assert!(summary.converged, "step {} did not converge", k + 1);
        assert!(summary.front_error <= 1e-4);
        // Both wings hold everything injected so far on top of the seed.
        assert_relative_eq!(
            summary.fracture_volume,
            summary.injected_volume,
            max_relative = 1e-6
        );
    }

    assert_relative_eq!(reports[0].summary.front_location, 1.568, max_relative = 1e-2);
    assert_relative_eq!(last.front_location(), 57.84, max_relative = 1e-2);
    assert_eq!(last.time(), 700.0);
    assert!(last.tip_ind() < last.mesh().nx());
    assert_eq!(
        reports.last().unwrap().summary.front_location,
        last.front_location()
    );

    // Cells open in order and never close.
    let exposure = last.exposure_time();
    for pair in exposure[..last.tip_ind()].windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    Ok(())
}

#[test]
fn reference_config_from_json() -> Result<(), LoadConfigError> {
    let config: Config = serde_json::from_str(REFERENCE_CONFIG_JSON)?;
    assert_eq!(config, reference_config());
    config.validate()?;
    Ok(())
}
