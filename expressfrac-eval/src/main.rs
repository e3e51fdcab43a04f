use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use expressfrac::{Config, Runner, StepReport};
use indicatif::{ProgressBar, ProgressStyle};

const ABOUT: &str = "
ExpressFrac simulates the growth of a PKN hydraulic fracture with the Implicit Level-Set Algorithm.";

#[derive(Parser)]
#[clap(author, about = ABOUT, name = "expressfrac")]
struct Opt {
    /// Path to the case configuration file.
    ///
    /// The file is expected to be in `json` or `ron` format.
    #[clap(name = "CONFIG", parse(from_os_str))]
    config: PathBuf,

    /// Output directory.
    ///
    /// One `sim_result_<n>.json` file is written per time step, starting with
    /// `sim_result_1.json`. Defaults to a directory named after the case in the current working
    /// directory.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Log file path.
    #[clap(short, long, parse(from_os_str))]
    logfile: Option<PathBuf>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

pub fn main() {
    if let Err(err) = try_main() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

pub fn try_main() -> Result<()> {
    let opt = Opt::parse();

    let _ = env_logger::Builder::new()
        .filter_level(opt.verbose.log_level_filter())
        .parse_env("EXPRESSFRAC_LOG")
        .try_init();

    // Pre-emptively create the log file. This way we can fail early.
    if let Some(logfile) = opt.logfile.as_ref() {
        let _ = File::create(logfile)?;
    }

    let config = expressfrac::load_config(&opt.config)
        .with_context(|| format!("Failed to load config: {}", opt.config.display()))?;
    config.validate()?;

    let out_path = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(".").join(&config.case_name));
    std::fs::create_dir_all(&out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_path.display()))?;

    // Write the config so we know how the following log was created.
    if let Some(logfile) = opt.logfile.as_ref() {
        let f = File::options().append(true).open(logfile)?;
        let mut buf = BufWriter::new(f);
        writeln!(buf, "Config:\n")?;
        serde_json::to_writer_pretty(&mut buf, &config)?;
        writeln!(buf)?;
    }

    run(&config, &out_path, opt.logfile.as_deref())
}

/// Number of steps needed to cover the schedule, counting the shortened last step.
fn num_steps(runner: &Runner) -> u64 {
    let duration = runner.solver().schedule().time_end() - runner.initial_state().time();
    (duration / runner.time_step()).ceil().max(1.0) as u64
}

fn write_report(report: &StepReport, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut buf = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut buf, report)?;
    buf.flush()?;
    Ok(())
}

fn run(config: &Config, out_path: &Path, logfile: Option<&Path>) -> Result<()> {
    let mut runner = Runner::new(config)?;

    let progress = ProgressBar::new(num_steps(&runner));
    progress.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} [{elapsed_precise}] {msg}",
    )?);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    // The solver blocks once the writer falls this many steps behind.
    let (sender, receiver) = crossbeam_channel::bounded::<StepReport>(16);
    let worker = std::thread::spawn(move || {
        let mut sender = sender;
        let result = runner.solve(&mut sender);
        (runner.notifications(), result)
    });

    let mut written = 0;
    while !interrupted.load(Ordering::SeqCst) {
        let report = match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(report) => report,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        written += 1;
        write_report(&report, &out_path.join(format!("sim_result_{}.json", written)))?;

        if let Some(logfile) = logfile {
            let mut f = File::options().append(true).open(logfile)?;
            writeln!(
                f,
                "\nStep {}:\n{}",
                written,
                serde_json::to_string(&report.summary)?
            )?;
        }

        progress.inc(1);
        progress.set_message(format!(
            "t = {:.1} s, length = {:.2} m",
            report.summary.time, report.summary.fracture_length
        ));
    }
    // A dropped receiver makes the solver stop at its next step.
    drop(receiver);

    let (notified, result) = worker
        .join()
        .map_err(|_| anyhow::anyhow!("Solver thread panicked"))?;
    progress.finish();

    match result {
        Ok(fracture) => {
            log::info!(
                "Finished {} steps at time {}: fracture length {}",
                notified,
                fracture.time(),
                2.0 * fracture.front_location()
            );
        }
        Err(expressfrac::Error::Notifier { .. }) if interrupted.load(Ordering::SeqCst) => {
            log::warn!("Interrupted after writing {} of {} steps", written, notified);
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
