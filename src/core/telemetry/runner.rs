//! Bounded execution of external utilities.
//!
//! Every probe that shells out goes through a [`CommandRunner`] with an
//! explicit deadline. The production runner kills the child when the
//! deadline elapses, so a hung utility can never stall a refresh tick.

use std::future::Future;
use std::io;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::ProbeError;

/// Runs a program and returns its captured stdout.
pub trait CommandRunner {
    /// Run `program` with `args`, giving up after `deadline`.
    ///
    /// Not-found, non-zero exit and timeout all come back as `Err`.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        deadline: Duration,
    ) -> impl Future<Output = Result<String, ProbeError>> + Send;
}

/// Runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl CommandRunner for TokioRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        deadline: Duration,
    ) -> Result<String, ProbeError> {
        log::debug!("running {} {:?} (deadline {:?})", program, args, deadline);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        // On timeout the future owning the child is dropped, which kills it.
        let output = match timeout(deadline, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ProbeError::Io {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ProbeError::TimedOut {
                    program: program.to_string(),
                    deadline,
                })
            }
        };

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn spawn_error(program: &str, err: io::Error) -> ProbeError {
    if err.kind() == io::ErrorKind::NotFound {
        ProbeError::NotFound {
            program: program.to_string(),
        }
    } else {
        ProbeError::Io {
            program: program.to_string(),
            source: err,
        }
    }
}
