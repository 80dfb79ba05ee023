use sorthc::compiler::Compiler;

#[test]
fn mangle_collisions_across_successive_definitions_get_suffixes() {
    let output = Compiler::compile_source(": + 1 ; : + 2 ; : +! 3 ;").unwrap();
    // First `+` mangles to `word__plus`; the redefinition collides and
    // gets `word__plus_1`; `+!` mangles independently to `word__plus_store`.
    assert!(output.contains("static void word__plus(void) {"));
    assert!(output.contains("static void word__plus_1(void) {"));
    assert!(output.contains("static void word__plus_store(void) {"));
}

#[test]
fn variable_and_word_mangle_pools_are_independent() {
    let output = Compiler::compile_source("variable count : count2 count ;").unwrap();
    assert!(output.contains("static uintptr_t var_count;"));
    assert!(output.contains("static void word_count(void) {"));
}
