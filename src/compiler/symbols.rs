use crate::{
    compiler::{forms::CompileForm, mangle::Mangler},
    runtime::error::{CompileError, Result},
};

/// Bitset over a definition's roles, mirroring `forthc.c`'s `DEF_*` `#define`
/// constants. Queries are AND-mask ("does this definition have at least
/// these bits"), not equality, which is why this stays a bitset rather than
/// a plain enum even though each definition's payload is enum-shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefTag(u8);

impl DefTag {
    pub const NONE: DefTag = DefTag(0);
    pub const COMPILE: DefTag = DefTag(1 << 0);
    pub const TOP_LEVEL: DefTag = DefTag(1 << 1);
    pub const PRIMITIVE: DefTag = DefTag(1 << 2);
    pub const USER: DefTag = DefTag(1 << 3);

    pub const fn contains_all(self, required: DefTag) -> bool {
        (self.0 & required.0) == required.0
    }
}

impl std::ops::BitOr for DefTag {
    type Output = DefTag;

    fn bitor(self, rhs: DefTag) -> DefTag {
        DefTag(self.0 | rhs.0)
    }
}

/// A single entry in the symbol table. Only one of `compile_form` /
/// `target` is meaningful at a time, depending on `tag`:
/// - `COMPILE` (and `COMPILE | TOP_LEVEL`): `compile_form` is set.
/// - `PRIMITIVE` / `USER`: `target` names the C function to call.
#[derive(Clone, Debug)]
pub struct Definition {
    pub forth_word: String,
    pub target: Option<String>,
    pub compile_form: Option<CompileForm>,
    pub tag: DefTag,
}

/// The symbol table. Definitions are appended in source order, but a
/// redefinition of an existing word overwrites its entry in place rather
/// than shadowing it with a new one — `forthc.c::allocate_definition` does
/// this by running its own `lookup(word, 0)` before reserving a fresh slot.
pub struct SymbolTable {
    definitions: Vec<Definition>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            definitions: Vec::new(),
        }
    }

    /// Most-recent-first scan for `forth_word`. A name match whose tag does
    /// not carry every bit in `required_tag` is a fatal symbol error, not a
    /// miss — using a word in the wrong role is a real mistake, not an
    /// "undefined" one.
    pub fn lookup(&self, forth_word: &str, required_tag: DefTag) -> Result<Option<&Definition>> {
        for def in self.definitions.iter().rev() {
            if def.forth_word != forth_word {
                continue;
            }
            if !def.tag.contains_all(required_tag) {
                return Err(CompileError::symbol(format!(
                    "definition is not of the expected type: {}",
                    forth_word
                )));
            }
            return Ok(Some(def));
        }
        Ok(None)
    }

    fn allocate_index(&mut self, forth_word: &str) -> usize {
        if let Some(idx) = self
            .definitions
            .iter()
            .rposition(|def| def.forth_word == forth_word)
        {
            idx
        } else {
            self.definitions.push(Definition {
                forth_word: forth_word.to_string(),
                target: None,
                compile_form: None,
                tag: DefTag::NONE,
            });
            self.definitions.len() - 1
        }
    }

    pub fn define_compile_top_level(&mut self, forth_word: &str, form: CompileForm) {
        let idx = self.allocate_index(forth_word);
        self.definitions[idx] = Definition {
            forth_word: forth_word.to_string(),
            target: None,
            compile_form: Some(form),
            tag: DefTag::COMPILE | DefTag::TOP_LEVEL,
        };
    }

    pub fn define_compile(&mut self, forth_word: &str, form: CompileForm) {
        let idx = self.allocate_index(forth_word);
        self.definitions[idx] = Definition {
            forth_word: forth_word.to_string(),
            target: None,
            compile_form: Some(form),
            tag: DefTag::COMPILE,
        };
    }

    pub fn define_primitive(&mut self, forth_word: &str, c_func_name: &str) {
        let idx = self.allocate_index(forth_word);
        self.definitions[idx] = Definition {
            forth_word: forth_word.to_string(),
            target: Some(c_func_name.to_string()),
            compile_form: None,
            tag: DefTag::PRIMITIVE,
        };
    }

    /// Defines a user word, mangling its C name with the `word_` prefix,
    /// and returns that name.
    pub fn define_user(&mut self, forth_word: &str, mangler: &mut Mangler) -> String {
        let target = mangler.mangle("word_", forth_word);
        let idx = self.allocate_index(forth_word);
        self.definitions[idx] = Definition {
            forth_word: forth_word.to_string(),
            target: Some(target.clone()),
            compile_form: None,
            tag: DefTag::USER,
        };
        target
    }
}

impl Default for SymbolTable {
    fn default() -> SymbolTable {
        SymbolTable::new()
    }
}
