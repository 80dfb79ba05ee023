use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    process::{ExitCode, Termination},
};

pub type Result<T> = std::result::Result<T, CompileError>;

/// The kind of fatal condition that terminated compilation or execution.
/// Every error falls into one of these four kinds; all of them are fatal
/// and terminate with exit code 2 (or, for runtime `os-exit`, whatever
/// status the script supplied).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed string, empty word at a boundary, null byte in source.
    Lex,

    /// Undefined word, or a definition used with the wrong role.
    Symbol,

    /// Unexpected token type at a position expecting another.
    Structural,

    /// Allocation failure, or a resource exceeding implementation limits.
    Resource,

    /// A runtime primitive trapped (numeric overflow, OOM).
    Runtime,
}

/// Any fatal error raised while compiling a source file or executing the
/// runtime primitive mirror: a single error type, printable, convertible to
/// a process exit code.
#[derive(Clone, Debug)]
pub struct CompileError {
    kind: ErrorKind,
    message: String,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> CompileError {
        CompileError {
            kind,
            message: message.into(),
        }
    }

    pub fn lex(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Lex, message)
    }

    pub fn symbol(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Symbol, message)
    }

    pub fn structural(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Structural, message)
    }

    pub fn resource(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Resource, message)
    }

    pub fn runtime(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Runtime, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Error for CompileError {}

impl Display for CompileError {
    /// A single diagnostic line, with no source position reported.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// When returned from `main`, convert the error to the fixed exit code used
/// for any fatal compiler error.
impl Termination for CompileError {
    fn report(self) -> ExitCode {
        eprintln!("{}", self);
        ExitCode::from(2)
    }
}

impl From<std::io::Error> for CompileError {
    fn from(error: std::io::Error) -> CompileError {
        CompileError::resource(format!("I/O error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_message_only() {
        let error = CompileError::lex("source code contains null byte");
        assert_eq!(format!("{}", error), "source code contains null byte");
    }

    #[test]
    fn kind_round_trips() {
        let error = CompileError::symbol("not defined: foo");
        assert_eq!(error.kind(), ErrorKind::Symbol);
    }
}
