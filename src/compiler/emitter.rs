/// Accumulates the emitted C source text. A thin wrapper over a `String`
/// rather than writing straight to stdout, so the compiler is testable
/// without capturing process output.
pub struct Emitter {
    buffer: String,
}

impl Emitter {
    /// Four spaces, matching `forthc.c`'s `static const char indent[]`.
    pub const INDENT: &'static str = "    ";

    pub fn new() -> Emitter {
        Emitter {
            buffer: String::new(),
        }
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.buffer.push_str(Self::INDENT);
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_source(self) -> String {
        self.buffer
    }
}

impl Default for Emitter {
    fn default() -> Emitter {
        Emitter::new()
    }
}
