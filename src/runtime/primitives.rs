/// Forth primitive name -> C symbol it compiles to. This is the single
/// source of truth the compiler's builtin registration reads from; the
/// embedded runtime template must define exactly these symbols (checked by
/// a test in `runtime::template`). Verified against every
/// `define_primitive` call in `forthc.c`'s `main`.
pub const REGISTRY: &[(&str, &str)] = &[
    ("<>", "prim_ne"),
    ("=", "prim_eq"),
    ("<", "prim_lt"),
    ("<=", "prim_le"),
    (">", "prim_gt"),
    (">=", "prim_ge"),
    (">=s", "prim_ge_s"),
    ("+", "prim_plus"),
    ("+s", "prim_plus_s"),
    ("+carry", "prim_plus_carry"),
    ("-", "prim_minus"),
    ("-s", "prim_minus_s"),
    ("*", "prim_star"),
    ("*s", "prim_star_s"),
    ("@", "prim_fetch"),
    ("!", "prim_store"),
    ("byte@", "prim_byte_fetch"),
    ("byte!", "prim_byte_store"),
    ("bytes=", "prim_bytes_equal"),
    ("allocate", "prim_allocate"),
    ("and-bits", "prim_and_bits"),
    ("call", "prim_call"),
    ("cell-bits", "prim_cell_bits"),
    ("cells", "prim_cells"),
    ("deallocate", "prim_deallocate"),
    ("drop", "prim_drop"),
    ("dup", "prim_dup"),
    ("flag", "prim_flag"),
    ("max->n-bits", "prim_max_to_n_bits"),
    ("n-bits->bitmask", "prim_n_bits_to_bitmask"),
    ("or-bits", "prim_or_bits"),
    ("os-error-message", "prim_os_error_message"),
    ("os-exit", "prim_os_exit"),
    ("os-read", "prim_os_read"),
    ("os-write", "prim_os_write"),
    ("reallocate", "prim_reallocate"),
    ("show", "prim_show"),
    ("show-byte", "prim_show_byte"),
    ("show-bytes", "prim_show_bytes"),
    ("show-hex", "prim_show_hex"),
    ("show-stack", "prim_show_stack"),
    ("shows", "prim_shows"),
    ("zero-cells", "prim_zero_cells"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_and_target_is_unique() {
        let mut names: Vec<&str> = REGISTRY.iter().map(|&(name, _)| name).collect();
        let original_len = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), original_len, "duplicate primitive name");

        let mut targets: Vec<&str> = REGISTRY.iter().map(|&(_, target)| target).collect();
        let original_len = targets.len();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), original_len, "duplicate primitive target");
    }

    #[test]
    fn every_target_is_a_prim_symbol() {
        for &(_, target) in REGISTRY {
            assert!(target.starts_with("prim_"), "{} is not prim_*", target);
        }
    }

    #[test]
    fn registry_matches_the_embedded_template() {
        let template = crate::runtime::template::RUNTIME_C;
        for &(name, target) in REGISTRY {
            assert!(
                template.contains(target),
                "primitive {} (-> {}) has no definition in the embedded runtime",
                name,
                target
            );
        }
    }
}
