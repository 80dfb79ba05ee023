/// Forth words contain characters that are not legal in a C identifier.
/// `Mangler` turns a Forth word into a unique C identifier, the way
/// `forthc.c::mangle` does: known punctuation substitutes a fixed word
/// fragment, everything else either passes through (if alphanumeric ASCII)
/// or becomes an underscore, and a numeric suffix is appended if the result
/// collides with a name already handed out.
pub struct Mangler {
    pool: Vec<String>,
}

/// `->` mangles to `_to_` (checked before any single-character rule, since
/// it spans two source characters).
const TWO_CHAR: &[(&str, &str)] = &[("->", "_to_")];

/// Single-character substitutions, in the order `forthc.c` checks them.
const ONE_CHAR: &[(u8, &str)] = &[
    (b'=', "_equal"),
    (b'@', "_fetch"),
    (b'!', "_store"),
    (b'+', "_plus"),
    (b'*', "_star"),
    (b'/', "_slash"),
    (b'?', "_p"),
];

fn is_passthrough(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

impl Mangler {
    pub fn new() -> Mangler {
        Mangler { pool: Vec::new() }
    }

    /// Mangle `forth_word` into a unique C identifier beginning with
    /// `prefix` (one of `"word_"`, `"var_"`, `"local_"`). Every call that
    /// produces a name already in the pool gets `_1`, `_2`, ... appended
    /// until it is unique.
    pub fn mangle(&mut self, prefix: &str, forth_word: &str) -> String {
        let bytes = forth_word.as_bytes();
        let mut base = String::from(prefix);
        let mut i = 0;

        while i < bytes.len() {
            if i + 1 < bytes.len() {
                let pair = &bytes[i..i + 2];
                if let Some(&(_, sub)) = TWO_CHAR.iter().find(|(pat, _)| pat.as_bytes() == pair) {
                    base.push_str(sub);
                    i += 2;
                    continue;
                }
            }

            if let Some(&(_, sub)) = ONE_CHAR.iter().find(|&&(ch, _)| ch == bytes[i]) {
                base.push_str(sub);
            } else if is_passthrough(bytes[i]) {
                base.push(bytes[i] as char);
            } else {
                base.push('_');
            }
            i += 1;
        }

        let mut candidate = base.clone();
        let mut suffix = 0u32;
        while self.pool.iter().any(|existing| existing == &candidate) {
            suffix += 1;
            candidate = format!("{}_{}", base, suffix);
        }

        self.pool.push(candidate.clone());
        candidate
    }
}

impl Default for Mangler {
    fn default() -> Mangler {
        Mangler::new()
    }
}
