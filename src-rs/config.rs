#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Lower bound of the simulated work duration, in seconds.
    pub min_work_secs: u64,
    /// Upper bound of the simulated work duration, inclusive.
    pub max_work_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_work_secs: 180,
            max_work_secs: 300,
        }
    }
}
