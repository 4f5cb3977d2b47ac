//! The execution environment a collector runs against.
//!
//! Platform, privilege and command resolution are passed in explicitly
//! rather than read from process state, so any combination can be
//! simulated in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::availability::{CommandResolver, PathResolver};
use crate::platform::is_elevated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Platforms shipping `pmset`, `system_profiler` and friends.
    pub fn has_power_cli(self) -> bool {
        self == Platform::MacOs
    }

    /// Platforms exposing `/sys/class/power_supply`.
    pub fn has_sysfs(self) -> bool {
        self == Platform::Linux
    }
}

pub struct ExecEnv {
    pub platform: Platform,
    /// Whether the process already runs with elevated privilege.
    pub elevated: bool,
    resolver: Box<dyn CommandResolver + Send + Sync>,
}

impl ExecEnv {
    pub fn new<R>(platform: Platform, elevated: bool, resolver: R) -> Self
    where
        R: CommandResolver + Send + Sync + 'static,
    {
        Self {
            platform,
            elevated,
            resolver: Box::new(resolver),
        }
    }

    /// Environment of the running process.
    pub fn detect() -> Self {
        Self::new(Platform::current(), is_elevated(), PathResolver)
    }

    pub fn command_exists(&self, program: &str) -> bool {
        self.resolver.resolve(program)
    }
}

impl fmt::Debug for ExecEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecEnv")
            .field("platform", &self.platform)
            .field("elevated", &self.elevated)
            .finish_non_exhaustive()
    }
}
