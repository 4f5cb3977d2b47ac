//! Probe descriptors and the fallback chain walk.
//!
//! A category's chain is an ordered slice of [`CommandProbe`]s. Each probe
//! states what it needs from the environment, how long it may run and how
//! to parse its output; [`first_success`] tries them in order.

use std::time::Duration;

use super::env::ExecEnv;
use super::runner::CommandRunner;

/// What must hold before a probe is worth spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Always attempted.
    Always,
    /// The program must resolve on the execution path.
    OnPath,
    /// On path, and the process must already be elevated.
    OnPathElevated,
}

/// One external-utility probe.
#[derive(Clone)]
pub struct CommandProbe<T> {
    pub label: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub deadline: Duration,
    pub requirement: Requirement,
    pub parse: fn(&str) -> Option<T>,
}

impl<T> CommandProbe<T> {
    pub fn is_usable(&self, env: &ExecEnv) -> bool {
        match self.requirement {
            Requirement::Always => true,
            Requirement::OnPath => env.command_exists(self.program),
            Requirement::OnPathElevated => env.elevated && env.command_exists(self.program),
        }
    }

    /// Runs the probe; any failure along the way is `None`.
    pub async fn run<R: CommandRunner>(&self, runner: &R, env: &ExecEnv) -> Option<T> {
        if !self.is_usable(env) {
            log::debug!("{}: skipped, requirement {:?} not met", self.label, self.requirement);
            return None;
        }

        let output = match runner.run(self.program, self.args, self.deadline).await {
            Ok(output) => output,
            Err(e) => {
                log::debug!("{}: unavailable: {}", self.label, e);
                return None;
            }
        };

        let value = (self.parse)(&output);
        if value.is_none() {
            log::debug!("{}: no usable value in output", self.label);
        }
        value
    }
}

/// Tries `probes` in order and returns the first value with its probe label.
pub async fn first_success<T, R: CommandRunner>(
    probes: &[CommandProbe<T>],
    runner: &R,
    env: &ExecEnv,
) -> Option<(&'static str, T)> {
    for probe in probes {
        if let Some(value) = probe.run(runner, env).await {
            return Some((probe.label, value));
        }
    }
    None
}
