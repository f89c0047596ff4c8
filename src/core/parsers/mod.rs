//! Source file parsers.
//!
//! - `jsx`: TS/TSX/JS source parser (uses swc for AST generation)

pub mod jsx;
