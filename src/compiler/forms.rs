use crate::{compiler::driver::Compiler, runtime::error::Result};

/// The seven built-in forms a definition's `compile` action can be. Stands
/// in for `forthc.c`'s `void (*compile)(void)` function pointer: since this
/// crate has no process-wide globals for those functions to close over, a
/// definition instead names which form it is and `dispatch` routes to the
/// `Compiler` method that implements it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompileForm {
    /// `variable <name>`.
    Variable,

    /// `: <name> ... ;`.
    WordDefinition,

    /// `( ... )`: locals, or a `byte:`/`bytes:` literal.
    Parentheses,

    /// `' <name>`: push a user word's function pointer.
    Quote,

    /// `&`: short-circuit on a false flag.
    And,

    /// `|`: short-circuit on a true flag.
    Or,

    /// `recurse`: call the word currently being defined.
    Recurse,
}

impl CompileForm {
    pub fn dispatch(self, compiler: &mut Compiler) -> Result<()> {
        match self {
            CompileForm::Variable => compiler.compile_variable(),
            CompileForm::WordDefinition => compiler.compile_word_definition(),
            CompileForm::Parentheses => compiler.compile_parentheses(),
            CompileForm::Quote => compiler.compile_quote(),
            CompileForm::And => compiler.compile_and(),
            CompileForm::Or => compiler.compile_or(),
            CompileForm::Recurse => compiler.compile_recurse(),
        }
    }
}
