use crate::{
    compiler::{
        emitter::Emitter,
        forms::CompileForm,
        locals::LocalScope,
        mangle::Mangler,
        symbols::{DefTag, SymbolTable},
    },
    lang::tokenizing::{tokenize_from_source, Token, TokenList},
    runtime::{
        error::{CompileError, Result},
        primitives,
    },
};

/// Owns the token stream and every piece of compile-time state: the symbol
/// table, the mangle pool, the local scope, and the output buffer, in place
/// of the C original's process-wide globals.
pub struct Compiler {
    tokens: TokenList,
    pos: usize,
    mangler: Mangler,
    symbols: SymbolTable,
    locals: LocalScope,
    emitter: Emitter,

    /// The C target name of the word definition currently being compiled,
    /// used by `recurse`. `None` outside of a `:` body.
    current_target: Option<String>,
}

impl Compiler {
    pub fn new(tokens: TokenList) -> Compiler {
        let mut compiler = Compiler {
            tokens,
            pos: 0,
            mangler: Mangler::new(),
            symbols: SymbolTable::new(),
            locals: LocalScope::new(),
            emitter: Emitter::new(),
            current_target: None,
        };
        compiler.register_builtins();
        compiler
    }

    /// Tokenize `source` and compile it in one step, returning the emitted
    /// C source text.
    pub fn compile_source(source: &str) -> Result<String> {
        let tokens = tokenize_from_source(source)?;
        Compiler::new(tokens).compile()
    }

    fn register_builtins(&mut self) {
        self.symbols
            .define_compile_top_level("variable", CompileForm::Variable);
        self.symbols
            .define_compile_top_level(":", CompileForm::WordDefinition);

        self.symbols.define_compile("(", CompileForm::Parentheses);
        self.symbols.define_compile("'", CompileForm::Quote);
        self.symbols.define_compile("&", CompileForm::And);
        self.symbols.define_compile("|", CompileForm::Or);
        self.symbols.define_compile("recurse", CompileForm::Recurse);

        for &(forth_word, c_func_name) in primitives::REGISTRY {
            self.symbols.define_primitive(forth_word, c_func_name);
        }
    }

    /// The top-level driver loop: repeatedly reads a word, looks it up as a
    /// top-level form, and dispatches into it, until the token stream is
    /// exhausted.
    pub fn compile(mut self) -> Result<String> {
        loop {
            if self.at_eof() {
                break;
            }

            let forth_word = self
                .take_word()
                .ok_or_else(|| CompileError::structural("unknown top-level syntax"))?;

            let form = {
                let def = self
                    .symbols
                    .lookup(&forth_word, DefTag::TOP_LEVEL)?
                    .ok_or_else(|| {
                        CompileError::symbol(format!(
                            "no top-level definition: {}",
                            forth_word
                        ))
                    })?;
                def.compile_form
                    .expect("top-level definitions always carry a compile form")
            };

            self.emitter.newline();
            form.dispatch(&mut self)?;
        }

        Ok(self.emitter.into_source())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn take_word(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Word(text)) => {
                let text = text.clone();
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }

    fn take_the_word(&mut self, word: &str) -> bool {
        match self.peek() {
            Some(Token::Word(text)) if text == word => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn take_string(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::StringLit(text)) => {
                let text = text.clone();
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }

    fn take_uint_or_char(&mut self) -> Option<u64> {
        match self.peek() {
            Some(Token::UInt(value)) | Some(Token::Char(value)) => {
                let value = *value;
                self.pos += 1;
                Some(value)
            }
            _ => None,
        }
    }

    fn take_negint(&mut self) -> Option<u64> {
        match self.peek() {
            Some(Token::NegInt(value)) => {
                let value = *value;
                self.pos += 1;
                Some(value)
            }
            _ => None,
        }
    }

    pub(crate) fn compile_variable(&mut self) -> Result<()> {
        let forth_word = self
            .take_word()
            .ok_or_else(|| CompileError::structural("variable name expected"))?;
        let forth_word_setter = format!("{}!", forth_word);
        let c_var_name = self.mangler.mangle("var_", &forth_word);

        self.emitter.write("static uintptr_t ");
        self.emitter.write(&c_var_name);
        self.emitter.write_line(";");
        self.emitter.newline();

        let getter_target = self.symbols.define_user(&forth_word, &mut self.mangler);
        self.emitter.write("static void ");
        self.emitter.write(&getter_target);
        self.emitter.write_line("(void) {");
        self.emitter.indent();
        self.emitter.write("push(");
        self.emitter.write(&c_var_name);
        self.emitter.write_line(");");
        self.emitter.write_line("}");
        self.emitter.newline();

        let setter_target = self
            .symbols
            .define_user(&forth_word_setter, &mut self.mangler);
        self.emitter.write("static void ");
        self.emitter.write(&setter_target);
        self.emitter.write_line("(void) {");
        self.emitter.indent();
        self.emitter.write(&c_var_name);
        self.emitter.write_line(" = pop();");
        self.emitter.write_line("}");

        Ok(())
    }

    pub(crate) fn compile_word_definition(&mut self) -> Result<()> {
        let forth_word = self
            .take_word()
            .ok_or_else(|| CompileError::structural("word name expected"))?;
        let target = self.symbols.define_user(&forth_word, &mut self.mangler);
        self.current_target = Some(target.clone());

        self.emitter.write("static void ");
        self.emitter.write(&target);
        self.emitter.write_line("(void) {");

        while !self.take_the_word(";") {
            self.emitter.indent();

            if let Some(word) = self.take_word() {
                self.compile_word_use(&word)?;
            } else if let Some(text) = self.take_string() {
                self.emitter
                    .write("push((uintptr_t)(unsigned char *)\"");
                self.emitter.write(&text);
                self.emitter.write_line("\");");
            } else if let Some(value) = self.take_uint_or_char() {
                self.emitter.write("push(");
                self.emitter.write(&value.to_string());
                self.emitter.write_line(");");
            } else if let Some(value) = self.take_negint() {
                self.emitter.write("push((uintptr_t)-(intptr_t)");
                self.emitter.write(&value.to_string());
                self.emitter.write_line(");");
            } else {
                return Err(CompileError::structural("huh?"));
            }
        }

        self.emitter.write_line("}");
        self.locals.rollback();
        self.current_target = None;
        Ok(())
    }

    fn compile_word_use(&mut self, word: &str) -> Result<()> {
        if let Some((local, is_setter)) = self.locals.lookup(word) {
            let c_var_name = local.c_var_name.clone();
            if !is_setter {
                self.emitter.write("push(");
                self.emitter.write(&c_var_name);
                self.emitter.write_line(");");
            } else {
                self.emitter.write(&c_var_name);
                self.emitter.write_line(" = pop();");
            }
            return Ok(());
        }

        let found = self.symbols.lookup(word, DefTag::NONE)?.cloned();
        match found {
            Some(def) if def.tag == DefTag::COMPILE => {
                let form = def
                    .compile_form
                    .expect("DEF_COMPILE definitions always carry a compile form");
                form.dispatch(self)
            }
            Some(def) if def.tag == DefTag::PRIMITIVE || def.tag == DefTag::USER => {
                let target = def
                    .target
                    .expect("primitive/user definitions always carry a target");
                self.emitter.write(&target);
                self.emitter.write_line("();");
                Ok(())
            }
            Some(_) => Err(CompileError::symbol(format!(
                "cannot use that in a definition: {}",
                word
            ))),
            None => Err(CompileError::symbol(format!("not defined: {}", word))),
        }
    }

    pub(crate) fn compile_parentheses(&mut self) -> Result<()> {
        if self.take_the_word("byte:") {
            self.take_string()
                .ok_or_else(|| CompileError::structural("error"))?;
            return if self.take_the_word(")") {
                Ok(())
            } else {
                Err(CompileError::structural("error"))
            };
        }

        if self.take_the_word("bytes:") {
            let mut buf: Vec<u8> = Vec::new();
            while !self.take_the_word(")") {
                if let Some(text) = self.take_string() {
                    buf.extend_from_slice(text.as_bytes());
                } else if let Some(value) = self.take_uint_or_char() {
                    if value > 0xff {
                        return Err(CompileError::structural("byte out of range"));
                    }
                    buf.push(value as u8);
                } else {
                    return Err(CompileError::structural("error"));
                }
            }
            let _ = buf;
            return Ok(());
        }

        self.locals.mark();
        while !self.take_the_word(")") {
            let word = self
                .take_word()
                .ok_or_else(|| CompileError::structural("wrong thing"))?;
            self.locals.add(&word, &mut self.mangler);
        }

        for (needs_indent, local) in self.locals.declared_since_mark() {
            if needs_indent {
                self.emitter.indent();
            }
            self.emitter.write("uintptr_t ");
            self.emitter.write(&local.c_var_name);
            self.emitter.write_line(" = pop();");
        }

        Ok(())
    }

    pub(crate) fn compile_quote(&mut self) -> Result<()> {
        let forth_word = self
            .take_word()
            .ok_or_else(|| CompileError::structural("word name expected"))?;
        let target = self
            .symbols
            .lookup(&forth_word, DefTag::USER)?
            .ok_or_else(|| CompileError::symbol(format!("not defined: {}", forth_word)))?
            .target
            .clone()
            .expect("DEF_USER definitions always carry a target");

        self.emitter.write("push((uintptr_t)");
        self.emitter.write(&target);
        self.emitter.write_line(");");
        Ok(())
    }

    pub(crate) fn compile_and(&mut self) -> Result<()> {
        self.emitter.write_line("if (!flag) return;");
        Ok(())
    }

    pub(crate) fn compile_or(&mut self) -> Result<()> {
        self.emitter.write_line("if (flag) return;");
        Ok(())
    }

    pub(crate) fn compile_recurse(&mut self) -> Result<()> {
        let target = self
            .current_target
            .clone()
            .expect("recurse used outside a word definition");
        self.emitter.write(&target);
        self.emitter.write_line("();");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_word_definition_compiles() {
        let output = Compiler::compile_source(": two 1 1 + ;").unwrap();
        assert!(output.contains("static void word_two(void) {"));
        assert!(output.contains("push(1);"));
        assert!(output.contains("prim_plus();"));
        assert!(output.contains("}\n"));
    }

    #[test]
    fn variable_emits_storage_getter_and_setter() {
        let output = Compiler::compile_source("variable x").unwrap();
        assert!(output.contains("static uintptr_t var_x;"));
        assert!(output.contains("static void word_x(void) {"));
        assert!(output.contains("push(var_x);"));
        assert!(output.contains("var_x = pop();"));
    }

    #[test]
    fn undefined_word_is_a_symbol_error() {
        let error = Compiler::compile_source(": bad nonsense ;").unwrap_err();
        assert!(error.message().contains("not defined: nonsense"));
    }

    #[test]
    fn negative_literal_emits_negation() {
        let output = Compiler::compile_source(": neg -5 ;").unwrap();
        assert!(output.contains("push((uintptr_t)-(intptr_t)5);"));
    }

    #[test]
    fn string_literal_emits_cast_push() {
        let output = Compiler::compile_source(": greet \"hi\" ;").unwrap();
        assert!(output.contains("push((uintptr_t)(unsigned char *)\"hi\");"));
    }

    #[test]
    fn locals_declare_and_use_in_reverse_push_order() {
        let output = Compiler::compile_source(": mid ( a b ) a b + ;").unwrap();
        assert!(output.contains("uintptr_t local_b = pop();"));
        assert!(output.contains("uintptr_t local_a = pop();"));
        // `b` (declared second) must be emitted before `a`.
        let b_pos = output.find("local_b = pop()").unwrap();
        let a_pos = output.find("local_a = pop()").unwrap();
        assert!(b_pos < a_pos);
        assert!(output.contains("push(local_a);"));
        assert!(output.contains("push(local_b);"));
    }

    #[test]
    fn local_setter_assigns_instead_of_pushing() {
        let output = Compiler::compile_source(": setx ( x ) 5 x! ;").unwrap();
        assert!(output.contains("local_x = pop();"));
    }

    #[test]
    fn recurse_calls_the_enclosing_word() {
        let output = Compiler::compile_source(": loop recurse ;").unwrap();
        assert!(output.contains("word_loop();"));
    }

    #[test]
    fn and_or_emit_short_circuit_guards() {
        let output = Compiler::compile_source(": both = & show ;").unwrap();
        assert!(output.contains("if (!flag) return;"));

        let output = Compiler::compile_source(": either = | show ;").unwrap();
        assert!(output.contains("if (flag) return;"));
    }

    #[test]
    fn quote_pushes_a_function_pointer() {
        let output = Compiler::compile_source(": helper ; : holder ' helper ;").unwrap();
        assert!(output.contains("push((uintptr_t)word_helper);"));
    }

    #[test]
    fn redefining_a_word_uses_the_new_definition() {
        let output = Compiler::compile_source(": x 1 ; : x 2 ; : y x ;").unwrap();
        assert!(output.contains("word_x_1();"));
    }

    #[test]
    fn byte_annotation_inside_parentheses_is_a_noop() {
        let output = Compiler::compile_source(": f ( byte: \"tag\" ) ;").unwrap();
        assert!(output.contains("static void word_f(void) {"));
        assert!(!output.contains("tag"));
    }

    #[test]
    fn unterminated_definition_is_a_structural_error() {
        let error = Compiler::compile_source(": broken 1 2").unwrap_err();
        assert!(error.message().contains("huh?"));
    }
}
