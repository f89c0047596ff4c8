use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Pick the swc syntax from the file extension.
///
/// `.ts` files are parsed without JSX so that `<T>value` assertions and generic
/// arrows keep working; `.js`/`.jsx` use the ECMAScript parser with JSX on.
pub fn syntax_for(file_path: &str) -> Syntax {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        "js" | "jsx" | "mjs" | "cjs" => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    }
}

/// Parse TS/TSX/JS source code into an AST.
///
/// Accepts a shared SourceMap so callers can parse files on several threads,
/// each with its own map.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(syntax_for(file_path), StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource { module, source_map })
    })
}
