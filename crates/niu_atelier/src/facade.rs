//! The parser/printer facade (spec.md §2, step 1).
//!
//! Wraps `oxc_parser`/`oxc_codegen` behind the two operations the pipeline
//! actually needs: parse source into an AST (for the collection phase of
//! each pass) and print an AST — or, since every pass here rewrites source
//! text rather than the AST in place, just print compact source directly.

use oxc_allocator::Allocator;
use oxc_codegen::{CodegenOptions, CodegenReturn};
use oxc_parser::{ParseOptions, Parser, ParserReturn};
use oxc_span::SourceType;

use crate::error::{NiuError, ParsePhase};

/// Guess a permissive source type: TypeScript + JSX, since the facade's
/// contract (spec.md §2 step 1) is to accept "JSX and TypeScript
/// permissive syntax" regardless of the file's real extension.
pub fn permissive_source_type() -> SourceType {
    SourceType::default()
        .with_typescript(true)
        .with_jsx(true)
        .with_module(true)
}

/// Parse `source` and hand back both the owning allocator and the parse
/// result, surfacing a parse error unchanged (spec.md §7: "the parser's
/// error is surfaced unchanged").
///
/// The allocator must outlive the returned [`ParserReturn`]; callers drive
/// a closure over `(allocator, parsed)` rather than holding the borrow
/// across a function boundary, mirroring how `vize_canon`'s import
/// rewriter keeps its allocator and parse result in the same scope.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    phase: ParsePhase,
) -> Result<ParserReturn<'a>, NiuError> {
    let ret = Parser::new(allocator, source, permissive_source_type())
        .with_options(ParseOptions {
            allow_return_outside_function: true,
            ..ParseOptions::default()
        })
        .parse();

    if let Some(first) = ret.errors.first() {
        return Err(NiuError::Parse {
            phase,
            message: first.to_string(),
        });
    }
    Ok(ret)
}

/// Print `program` back to compact source: no unnecessary whitespace, no
/// comments, minimal-length numeric/string literal forms, double-quoted
/// strings (spec.md §6 "Output contract").
pub fn print_compact<'a>(program: &oxc_ast::ast::Program<'a>) -> CodegenReturn {
    oxc_codegen::Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            ..CodegenOptions::default()
        })
        .build(program)
}
