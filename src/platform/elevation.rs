/// Whether the process runs with an effective uid of root.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    // Privileged samplers only exist on Unix hosts
    false
}
