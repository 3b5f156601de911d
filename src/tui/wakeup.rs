//! Self-pipe that wakes the main loop out of `libc::poll()`.
//!
//! The pacing task, document loads and the signal thread hold a `WakeupSender`; the main loop
//! polls stdin together with `WakeupReceiver::raw_fd()`.

use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::sync::Arc;

/// Write end. Closed when the last clone is dropped.
#[derive(Clone)]
pub struct WakeupSender {
    fd: Arc<OwnedFd>,
}

/// Non-blocking read end.
pub struct WakeupReceiver {
    fd: OwnedFd,
}

pub fn wakeup_pipe() -> io::Result<(WakeupSender, WakeupReceiver)> {
    let mut fds = [0 as RawFd; 2];
    // SAFETY: `fds` has room for the two descriptors pipe() writes.
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: both descriptors were just returned by pipe() and are owned by nothing else.
    let (read, write) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };

    set_nonblocking(&read)?;
    Ok((
        WakeupSender {
            fd: Arc::new(write),
        },
        WakeupReceiver { fd: read },
    ))
}

fn set_nonblocking(fd: &OwnedFd) -> io::Result<()> {
    let raw = fd.as_raw_fd();
    // SAFETY: `raw` stays open for the duration of both calls.
    let ok = unsafe {
        let flags = libc::fcntl(raw, libc::F_GETFL);
        flags != -1 && libc::fcntl(raw, libc::F_SETFL, flags | libc::O_NONBLOCK) != -1
    };
    if ok {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

impl WakeupSender {
    /// A full pipe already means a wakeup is pending, so write errors are ignored.
    pub fn wake(&self) {
        let byte = 1u8;
        // SAFETY: writes one byte from a live stack value to an open descriptor.
        unsafe {
            libc::write(self.fd.as_raw_fd(), (&byte as *const u8).cast(), 1);
        }
    }
}

impl WakeupReceiver {
    pub fn raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }

    pub fn drain(&self) {
        let mut buf = [0u8; 64];
        // SAFETY: `buf` outlives each read and the descriptor is non-blocking.
        while unsafe { libc::read(self.fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len()) } > 0 {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/wakeup.rs"]
mod tests;
