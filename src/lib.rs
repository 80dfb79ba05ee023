//! Forth-dialect to C compiler and its runtime primitive layer.
//!
//! The crate is split the way the toolchain itself is split: [`lang`] and
//! [`compiler`] implement the front-end-through-emitter (tokenizer, name
//! mangler, symbol table, local scope, code generator), while [`runtime`]
//! implements the stack-machine primitive contract the emitted C relies on,
//! both as an embedded C template and as a Rust-native mirror used for
//! testing that contract.

/// Module for managing the original source text and turning it into tokens.
pub mod lang;

/// Module for compiling a token stream into emitted C source text.
pub mod compiler;

/// Module for the runtime primitive layer: the stack ABI, arithmetic,
/// memory, and OS I/O primitives the emitted C is linked against.
pub mod runtime;
