//! Checks whether an external utility is installed before spawning it.

/// Answers "is this program on the execution path?" without running it.
pub trait CommandResolver {
    fn resolve(&self, program: &str) -> bool;
}

/// Resolver that searches `PATH` using the `which` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl CommandResolver for PathResolver {
    fn resolve(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

impl<F> CommandResolver for F
where
    F: Fn(&str) -> bool,
{
    fn resolve(&self, program: &str) -> bool {
        self(program)
    }
}
