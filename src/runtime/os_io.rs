use crate::runtime::error::{CompileError, Result};

/// The outcome of one `os-read`/`os-write` attempt: either a byte count (on
/// success), or a raw negative `errno` (on a non-retryable failure). EINTR
/// is retried internally and never observed by the caller, matching
/// `forth_os_unix.h`'s `io_loop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOutcome {
    Count(u64),
    Errno(i32),
}

fn retry_on_eintr(mut attempt: impl FnMut() -> isize) -> IoOutcome {
    loop {
        let n = attempt();
        if n >= 0 {
            return IoOutcome::Count(n as u64);
        }
        let errno = unsafe { *libc::__errno_location() };
        if errno != libc::EINTR {
            return IoOutcome::Errno(errno);
        }
    }
}

/// Read up to `nbyte` bytes from `fd` into `buf`, retrying transparently on
/// `EINTR`. `buf` must be at least `nbyte` bytes.
///
/// # Safety
/// `buf` must point to at least `nbyte` writable bytes.
pub unsafe fn os_read(fd: i32, buf: *mut u8, nbyte: usize) -> IoOutcome {
    retry_on_eintr(|| libc::read(fd, buf as *mut libc::c_void, nbyte))
}

/// Write up to `nbyte` bytes from `buf` to `fd`, retrying transparently on
/// `EINTR`.
///
/// # Safety
/// `buf` must point to at least `nbyte` readable bytes.
pub unsafe fn os_write(fd: i32, buf: *const u8, nbyte: usize) -> IoOutcome {
    retry_on_eintr(|| libc::write(fd, buf as *const libc::c_void, nbyte))
}

/// `strerror(errno)`, copied into an owned `String` before the static
/// buffer `strerror` returns a pointer into can be reused.
pub fn os_error_message(errno: i32) -> String {
    unsafe {
        let ptr = libc::strerror(errno);
        std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// `os-exit`: terminate the process immediately with `status`, matching
/// `prim_os_exit`'s direct call to `exit`. Never returns.
pub fn os_exit(status: i32) -> ! {
    std::process::exit(status)
}

/// Read an entire file's bytes, failing with a [`CompileError`] if it
/// cannot be opened or read. Used by the compiler's own source loader
/// (`SourceBuffer::from_path`), not by the runtime mirror's `os-read`
/// primitive — kept here because both sit on top of the same
/// EINTR-resilient read loop philosophy the original couples to I/O.
pub fn read_file(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|error| CompileError::resource(format!("{}: {}", path, error)))
}
