/// Error type shared by the compiler and the runtime primitive mirror.
pub mod error;

/// The Rust-native mirror of the stack-machine: data stack, flag, checked
/// arithmetic, and memory primitives.
pub mod vm;

/// The primitive registry (Forth name -> target C symbol) and the Rust
/// semantics each primitive must satisfy, used to test the contract the
/// emitted C code relies on.
pub mod primitives;

/// EINTR-resilient OS I/O primitives: `os-read`, `os-write`, `os-exit`,
/// `os-error-message`.
pub mod os_io;

/// The embedded C runtime template that the emitted program links against.
pub mod template;
