//! Starting the child process without a console window.

use crate::argv::ArgumentSource;
use crate::cmdline::CommandLine;
use crate::encoding::portable_to_wide;
use crate::error::{Error, Result};

/// `CREATE_NO_WINDOW` process creation flag.
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// NUL-terminated command line in the form the creation call takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandBuffer {
    Wide(Vec<u16>),
    Narrow(Vec<u8>),
}

impl CommandBuffer {
    /// The command line without its terminator.
    pub fn text(&self) -> String {
        match self {
            CommandBuffer::Wide(wide) => String::from_utf16_lossy(wide.strip_suffix(&[0]).unwrap_or(wide)),
            CommandBuffer::Narrow(narrow) => {
                String::from_utf8_lossy(narrow.strip_suffix(&[0]).unwrap_or(narrow)).into_owned()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    buffer: CommandBuffer,
    creation_flags: u32,
}

impl LaunchPlan {
    /// Builds the buffer for `command_line`.
    ///
    /// Wide arguments go through the wide call; if the line cannot be
    /// converted back the narrow call is used instead.
    pub fn prepare(source: ArgumentSource, command_line: &CommandLine) -> Result<LaunchPlan> {
        let buffer = match source {
            ArgumentSource::Wide => match portable_to_wide(command_line.as_bytes()) {
                Ok(wide) => CommandBuffer::Wide(terminated(&wide)?),
                Err(err) => {
                    eprint!("{}", err);
                    crate::trace!("launch", log::Level::Warn, "Falling back to narrow command line: {}", err);
                    CommandBuffer::Narrow(terminated(command_line.as_bytes())?)
                }
            },
            ArgumentSource::Native => CommandBuffer::Narrow(terminated(command_line.as_bytes())?),
        };

        Ok(LaunchPlan {
            buffer,
            creation_flags: CREATE_NO_WINDOW,
        })
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    pub fn creation_flags(&self) -> u32 {
        self.creation_flags
    }

    pub fn is_wide(&self) -> bool {
        matches!(self.buffer, CommandBuffer::Wide(_))
    }

    /// Starts the child and returns its process id. Handles are closed
    /// straight away; the child is not waited on.
    #[cfg(windows)]
    pub fn spawn(self) -> Result<u32> {
        use windows::{
            core::{PCSTR, PCWSTR, PSTR, PWSTR},
            Win32::Foundation::*,
            Win32::System::Threading::*,
        };

        let LaunchPlan { buffer, creation_flags } = self;

        unsafe {
            let mut pi: PROCESS_INFORMATION = std::mem::zeroed();

            let created = match buffer {
                CommandBuffer::Wide(mut cmdline) => {
                    let mut si: STARTUPINFOW = std::mem::zeroed();
                    si.cb = std::mem::size_of::<STARTUPINFOW>() as u32;

                    CreateProcessW(
                        PCWSTR(std::ptr::null()),
                        PWSTR(cmdline.as_mut_ptr()),
                        std::ptr::null(),
                        std::ptr::null(),
                        BOOL(0),
                        PROCESS_CREATION_FLAGS(creation_flags),
                        std::ptr::null(),
                        PCWSTR(std::ptr::null()),
                        &si,
                        &mut pi
                    )
                }
                CommandBuffer::Narrow(mut cmdline) => {
                    let mut si: STARTUPINFOA = std::mem::zeroed();
                    si.cb = std::mem::size_of::<STARTUPINFOA>() as u32;

                    CreateProcessA(
                        PCSTR(std::ptr::null()),
                        PSTR(cmdline.as_mut_ptr()),
                        std::ptr::null(),
                        std::ptr::null(),
                        BOOL(0),
                        PROCESS_CREATION_FLAGS(creation_flags),
                        std::ptr::null(),
                        PCSTR(std::ptr::null()),
                        &si,
                        &mut pi
                    )
                }
            };

            if !created.as_bool() {
                let code = GetLastError().0;
                crate::trace!("launch", log::Level::Error, "CreateProcess failed with {}", code);
                return Err(Error::CreateProcess { code });
            }

            CloseHandle(pi.hProcess);
            CloseHandle(pi.hThread);

            crate::trace!("launch", log::Level::Info, "Started process {}", pi.dwProcessId);
            Ok(pi.dwProcessId)
        }
    }

    /// Starts the command line through `/bin/sh -c` with null stdio and
    /// returns the child's process id without waiting on it.
    #[cfg(not(windows))]
    pub fn spawn(self) -> Result<u32> {
        use std::os::unix::ffi::OsStrExt;
        use std::process::{Command, Stdio};

        let line = match &self.buffer {
            CommandBuffer::Narrow(narrow) => narrow.strip_suffix(&[0]).unwrap_or(narrow).to_vec(),
            CommandBuffer::Wide(_) => self.buffer.text().into_bytes(),
        };

        let child = Command::new("/bin/sh")
            .arg("-c")
            .arg(std::ffi::OsStr::from_bytes(&line))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                let code = err.raw_os_error().unwrap_or(-1) as u32;
                crate::trace!("launch", log::Level::Error, "spawn failed with {}", err);
                Error::CreateProcess { code }
            })?;

        crate::trace!("launch", log::Level::Info, "Started process {}", child.id());
        Ok(child.id())
    }
}

// Exactly `text.len() + 1` elements, the last one zero.
fn terminated<T: Copy + Default>(text: &[T]) -> Result<Vec<T>> {
    let count = text.len() + 1;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(count).map_err(|_| Error::Allocation {
        requested: count.saturating_mul(std::mem::size_of::<T>()),
    })?;
    buffer.extend_from_slice(text);
    buffer.push(T::default());
    Ok(buffer)
}
