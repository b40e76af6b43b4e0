use std::fmt;
use std::time::Instant;

/// Step+render cycles per second, for the last cycle and since the first one.
#[derive(Clone, Debug, Default)]
pub struct CycleMeter {
    first_tick: Option<Instant>,
    last_tick: Option<Instant>,
    intervals: u64,
    current_rate: Option<f64>,
}

impl CycleMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            let seconds = now.saturating_duration_since(last).as_secs_f64();
            self.current_rate = (seconds > 0.0).then(|| 1.0 / seconds);
            self.intervals += 1;
        }
        self.first_tick.get_or_insert(now);
        self.last_tick = Some(now);
    }

    pub fn current_rate(&self) -> Option<f64> {
        self.current_rate
    }

    pub fn average_rate(&self) -> Option<f64> {
        let (first, last) = (self.first_tick?, self.last_tick?);
        let seconds = last.saturating_duration_since(first).as_secs_f64();
        (seconds > 0.0).then(|| self.intervals as f64 / seconds)
    }
}

/// The on-screen counters of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Counters {
    pub generation: u64,
    pub living_cells: usize,
    pub total_cells: usize,
    pub current_rate: Option<f64>,
    pub average_rate: Option<f64>,
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {} | {}/{} alive",
            self.generation, self.living_cells, self.total_cells
        )?;
        if let Some(rate) = self.current_rate {
            write!(f, " | {rate:.1} cycles/s")?;
        }
        if let Some(rate) = self.average_rate {
            write!(f, " (avg {rate:.1})")?;
        }
        Ok(())
    }
}
