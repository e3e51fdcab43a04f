use expressfrac::StepReport;
pub use expressfrac::test_utils::*;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env("EXPRESSFRAC_LOG")
        .is_test(true)
        .try_init();
}

/// Checks the invariants every sequence of step reports must satisfy.
#[allow(dead_code)]
pub fn check_history(reports: &[StepReport], time_end: f64) {
    use approx::*;
    assert!(!reports.is_empty());
    for pair in reports.windows(2) {
        assert!(pair[1].summary.time > pair[0].summary.time);
        assert!(pair[1].summary.front_location >= pair[0].summary.front_location);
    }
    for report in reports {
        let summary = &report.summary;
        assert!(summary.time <= time_end);
        assert!(summary.fracture_length.is_finite());
        assert_relative_eq!(summary.fracture_length, 2.0 * summary.front_location);
        assert!(report.results.effective_width.iter().all(|w| w.is_finite()));
        assert!(report.results.fluid_pressure.iter().all(|p| p.is_finite()));
        assert_eq!(report.mesh.xc.len(), report.results.effective_width.len());
    }
    assert_eq!(reports.last().unwrap().summary.time, time_end);
}
