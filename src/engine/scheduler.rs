// Tue Jan 13 2026 - Alex

use crate::diagnostics::DiagnosticEmitter;
use crate::engine::{Check, CheckContext, CheckRegistry, SchedulerStats};
use crate::reflection::StreamBuffer;
use crate::subject::SubjectType;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Runs every registered check on every subject it applies to.
///
/// Work proceeds in passes. A pass offers each check, in registration order,
/// every subject without an outcome for it; the check runs where its
/// prerequisite holds. Passes repeat until one executes nothing, so a check
/// gated on another check's success runs no matter which was registered
/// first. Each outcome is recorded exactly once.
pub struct CheckScheduler<'a> {
    registry: &'a CheckRegistry,
    diagnostics: &'a DiagnosticEmitter,
    buffer: StreamBuffer,
    debug: bool,
}

impl<'a> CheckScheduler<'a> {
    pub fn new(registry: &'a CheckRegistry, diagnostics: &'a DiagnosticEmitter, buffer_capacity: usize) -> Self {
        Self {
            registry,
            diagnostics,
            buffer: StreamBuffer::with_capacity(buffer_capacity),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn run_all(&mut self, subjects: &mut [SubjectType]) -> SchedulerStats {
        let registry = self.registry;
        let mut stats = SchedulerStats::new();

        loop {
            let mut executions = 0;
            for check in registry.iter() {
                let mut runs = 0;
                for subject in subjects.iter_mut() {
                    if subject.was_tested(check.name()) || !check.prerequisites(subject) {
                        continue;
                    }
                    let result = self.execute(check.as_ref(), subject, &mut stats);
                    subject.mark_tested(check.name(), result);
                    runs += 1;
                }
                log::info!("{}: {}", check.name(), runs);
                executions += runs;
            }

            stats.record_pass(executions);
            log::debug!("Pass {} done, {} executions", stats.passes(), executions);
            if executions == 0 {
                break;
            }
        }
        stats
    }

    // Failures and panics of the body end here; they never leave the pair.
    fn execute(&mut self, check: &dyn Check, subject: &SubjectType, stats: &mut SchedulerStats) -> bool {
        log::debug!("Testing {} [{}]", subject.name(), check.name());

        let diagnostics = self.diagnostics;
        let mut ctx = CheckContext {
            diagnostics,
            buffer: &mut self.buffer,
            debug: self.debug,
        };

        match panic::catch_unwind(AssertUnwindSafe(|| check.run(subject, &mut ctx))) {
            Ok(Ok(true)) => {
                stats.record_success();
                true
            }
            Ok(Ok(false)) => {
                stats.record_failure();
                false
            }
            Ok(Err(e)) => {
                log::debug!("{} [{}]: {:?}", subject.name(), check.name(), e.source_error());
                diagnostics.error(subject.decl_file(), &e.to_string());
                stats.record_failure();
                false
            }
            Err(payload) => {
                let message = format!(
                    "Check '{}' aborted while testing class '{}': {}",
                    check.name(),
                    subject.name(),
                    panic_message(payload.as_ref())
                );
                log::error!("{}", message);
                diagnostics.error(subject.decl_file(), &message);
                stats.record_panic();
                false
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
