/// The embedded runtime header, written out next to the compiler's emitted
/// C source so an external build can `#include` it.
pub const RUNTIME_H: &str = include_str!("template/sorth_runtime.h");

/// The embedded runtime implementation: the stack, the flag, and every
/// `prim_*` function the compiler's primitive registry names.
pub const RUNTIME_C: &str = include_str!("template/sorth_runtime.c");

/// Write both runtime template files into `dir` unless they already exist
/// there. Called by the binary after compiling, so the emitted program is
/// actually buildable by an external C toolchain without this crate
/// needing to invoke one itself.
pub fn write_if_absent(dir: &std::path::Path) -> std::io::Result<()> {
    for (name, contents) in [("sorth_runtime.h", RUNTIME_H), ("sorth_runtime.c", RUNTIME_C)] {
        let path = dir.join(name);
        if !path.exists() {
            std::fs::write(path, contents)?;
        }
    }
    Ok(())
}
