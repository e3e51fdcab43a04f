use crate::Error;

/// Piecewise-constant injection rate timeline.
///
/// Rates are total (two-wing) volumetric rates. Volumes returned by this type are per unit of
/// pay zone height.
#[derive(Clone, Debug, PartialEq)]
pub struct PumpingSchedule {
    /// Strictly increasing breakpoints.
    times: Vec<f64>,
    /// Rate on each segment `[times[k], times[k + 1]]`.
    flowrate: Vec<f64>,
    /// Pay zone height.
    height: f64,
}

impl PumpingSchedule {
    /// Constant injection of `flowrate` over `[0, duration]`.
    pub fn constant(duration: f64, flowrate: f64, pay_zone_height: f64) -> Result<Self, Error> {
        Self::piecewise(vec![0.0, duration], vec![flowrate], pay_zone_height)
            .map_err(|err| match err {
                Error::InvalidParameter { name } if name == "Schedule" => {
                    Error::invalid("Duration")
                }
                err => err,
            })
    }

    /// Stages given by `times[0..=n]` and one rate per stage.
    pub fn piecewise(
        times: Vec<f64>,
        flowrate: Vec<f64>,
        pay_zone_height: f64,
    ) -> Result<Self, Error> {
        if times.len() < 2
            || times.iter().any(|t| !t.is_finite())
            || times.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(Error::invalid("Schedule"));
        }
        if flowrate.len() != times.len() - 1
            || flowrate.iter().any(|q| !(q.is_finite() && *q >= 0.0))
        {
            return Err(Error::invalid("Flowrate"));
        }
        if !(pay_zone_height.is_finite() && pay_zone_height > 0.0) {
            return Err(Error::invalid("PayZoneHeight"));
        }
        Ok(PumpingSchedule {
            times,
            flowrate,
            height: pay_zone_height,
        })
    }

    pub fn time_start(&self) -> f64 {
        self.times[0]
    }

    pub fn time_end(&self) -> f64 {
        *self.times.last().unwrap_or(&0.0)
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn flowrates(&self) -> &[f64] {
        &self.flowrate
    }

    /// Injection rate at time `t`, zero outside the schedule.
    ///
    /// Breakpoints belong to the stage that starts there.
    pub fn flowrate_at(&self, t: f64) -> f64 {
        if t < self.time_start() || t >= self.time_end() {
            return 0.0;
        }
        let stage = self.times.partition_point(|&s| s <= t) - 1;
        self.flowrate[stage]
    }

    /// Volume per unit height injected over `[time_start, time_end]`.
    ///
    /// Only the part of the interval overlapping the schedule contributes. Reversed intervals
    /// inject nothing.
    pub fn injected_volume(&self, time_start: f64, time_end: f64) -> f64 {
        let volume: f64 = self
            .times
            .windows(2)
            .zip(self.flowrate.iter())
            .map(|(stage, &q)| {
                let overlap = time_end.min(stage[1]) - time_start.max(stage[0]);
                q * overlap.max(0.0)
            })
            .sum();
        volume / self.height
    }

    /// Mean rate per unit height over `[time_start, time_end]`.
    ///
    /// For an empty interval this is the instantaneous rate at `time_start`.
    pub fn mean_flowrate(&self, time_start: f64, time_end: f64) -> f64 {
        if time_end > time_start {
            self.injected_volume(time_start, time_end) / (time_end - time_start)
        } else {
            self.flowrate_at(time_start) / self.height
        }
    }
}
