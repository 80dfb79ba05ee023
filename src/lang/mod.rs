/// Module for holding the source text and providing a positional read cursor.
pub mod source_buffer;

/// Module for turning the source buffer into a finite ordered token stream.
pub mod tokenizing;
