//! The opt-in `const` → `let` rewrite (spec.md §4.5): the only pass that
//! changes program semantics (reassignment becomes legal), so it always
//! runs last and only when explicitly requested.

use oxc_ast::ast::{Program, VariableDeclarationKind};
use oxc_span::GetSpan;

use crate::rewrite::{apply_splices, Splice};

pub struct ConstToLetResult {
    pub code: String,
    pub rewritten_count: usize,
}

pub fn run(source: &str, program: &Program<'_>) -> ConstToLetResult {
    use oxc_ast::ast::Statement;

    let mut splices = Vec::new();

    fn visit_statements(stmts: &[Statement<'_>], splices: &mut Vec<Splice>) {
        for stmt in stmts {
            visit_statement(stmt, splices);
        }
    }

    fn visit_statement(stmt: &Statement<'_>, splices: &mut Vec<Splice>) {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                if decl.kind == VariableDeclarationKind::Const {
                    let start = decl.span().start;
                    splices.push(Splice::new(start, start + "const".len() as u32, "let"));
                }
            }
            Statement::BlockStatement(b) => visit_statements(&b.body, splices),
            Statement::IfStatement(i) => {
                visit_statement(&i.consequent, splices);
                if let Some(alt) = &i.alternate {
                    visit_statement(alt, splices);
                }
            }
            Statement::ForStatement(f) => {
                if let Some(oxc_ast::ast::ForStatementInit::VariableDeclaration(decl)) = &f.init {
                    if decl.kind == VariableDeclarationKind::Const {
                        let start = decl.span().start;
                        splices.push(Splice::new(start, start + "const".len() as u32, "let"));
                    }
                }
                visit_statement(&f.body, splices);
            }
            Statement::ForInStatement(f) => visit_statement(&f.body, splices),
            Statement::ForOfStatement(f) => visit_statement(&f.body, splices),
            Statement::WhileStatement(w) => visit_statement(&w.body, splices),
            Statement::DoWhileStatement(d) => visit_statement(&d.body, splices),
            Statement::TryStatement(t) => {
                visit_statements(&t.block.body, splices);
                if let Some(handler) = &t.handler {
                    visit_statements(&handler.body.body, splices);
                }
                if let Some(finalizer) = &t.finalizer {
                    visit_statements(&finalizer.body, splices);
                }
            }
            Statement::FunctionDeclaration(f) => {
                if let Some(body) = &f.body {
                    visit_statements(&body.statements, splices);
                }
            }
            Statement::ExpressionStatement(e) => {
                if let oxc_ast::ast::Expression::ArrowFunctionExpression(a) = &e.expression {
                    visit_statements(&a.body.statements, splices);
                }
            }
            Statement::SwitchStatement(s) => {
                for case in &s.cases {
                    visit_statements(&case.consequent, splices);
                }
            }
            _ => {}
        }
    }

    visit_statements(&program.body, &mut splices);
    let rewritten_count = splices.len();

    ConstToLetResult {
        code: apply_splices(source, splices),
        rewritten_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn run_source(src: &str) -> ConstToLetResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::default().with_module(true)).parse();
        run(src, &ret.program)
    }

    #[test]
    fn top_level_const_becomes_let() {
        let result = run_source("const x = 1;");
        assert_eq!(result.code, "let x = 1;");
        assert_eq!(result.rewritten_count, 1);
    }

    #[test]
    fn nested_const_inside_block_is_rewritten() {
        let result = run_source("if (a) { const y = 2; }");
        assert_eq!(result.code, "if (a) { let y = 2; }");
    }

    #[test]
    fn let_declarations_are_untouched() {
        let result = run_source("let x = 1;");
        assert_eq!(result.code, "let x = 1;");
        assert_eq!(result.rewritten_count, 0);
    }
}
