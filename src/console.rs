/// Connects stdout/stderr to the console of the process that started us, if
/// there is one. Built for the windows subsystem, the launcher otherwise has
/// nowhere to print usage text or errors.
#[cfg(windows)]
pub fn attach_parent_console() {
    use windows::Win32::System::Console::{AttachConsole, ATTACH_PARENT_PROCESS};

    // Fails when there is no parent console; nothing to do then.
    unsafe {
        AttachConsole(ATTACH_PARENT_PROCESS);
    }
}

#[cfg(not(windows))]
pub fn attach_parent_console() {}
