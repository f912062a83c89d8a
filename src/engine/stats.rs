// Tue Jan 13 2026 - Alex

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Executions of every pass, including the final empty one.
    pub executions_per_pass: Vec<usize>,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures caused by a check body that panicked.
    pub panicked: usize,
}

impl SchedulerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, executions: usize) {
        self.executions_per_pass.push(executions);
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record_panic(&mut self) {
        self.panicked += 1;
        self.failed += 1;
    }

    pub fn passes(&self) -> usize {
        self.executions_per_pass.len()
    }

    pub fn executions(&self) -> usize {
        self.executions_per_pass.iter().sum()
    }
}
