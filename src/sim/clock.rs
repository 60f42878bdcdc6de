/// A simulation clock that counts applied steps and elapsed hours.
///
/// Time in the simulation is discrete: it only moves when a use or recharge
/// step of a given number of hours is applied.
///
/// # Examples
///
/// ```
/// use pack_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new();
/// assert_eq!(clock.tick(Some(1.5)), 0);
/// assert_eq!(clock.tick(None), 1);
/// assert_eq!(clock.elapsed_hours(), 1.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Clock {
    /// Index of the next step
    step: usize,
    /// Simulated hours accumulated so far
    elapsed_hours: f64,
}

impl Clock {
    /// Creates a clock at step zero with no elapsed time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one step, optionally advancing simulated time.
    ///
    /// # Arguments
    ///
    /// * `hours` - Hours the step advances; `None` for instantaneous steps
    ///
    /// # Returns
    ///
    /// The index of the recorded step (starting from 0)
    pub fn tick(&mut self, hours: Option<f64>) -> usize {
        let step = self.step;
        self.step += 1;
        if let Some(h) = hours {
            self.elapsed_hours += h.max(0.0);
        }
        step
    }

    /// Number of steps recorded so far.
    pub fn steps(&self) -> usize {
        self.step
    }

    /// Simulated hours accumulated so far.
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_hours
    }
}
