//! The hand-rolled scope walker.
//!
//! Builds a [`niu_croquis::scope::ScopeTree`] by recursively walking
//! `oxc_ast` nodes directly, rather than relying on `oxc_semantic`'s
//! AST-attached scope metadata — which would need rebuilding from scratch
//! after every pass anyway, since every pass here rewrites source text and
//! re-parses (spec.md §9's "scope representation requires re-architecture"
//! design note). Modeled directly on the recursive-descent style of
//! `vize_croquis::script_parser::walk`.

use oxc_ast::ast::{AssignmentTarget, BindingPatternKind, Expression, Program, Statement, UnaryOperator};
use oxc_span::GetSpan;

use niu_croquis::scope::{BindingKind, ScopeId, ScopeKind, ScopeTree};

/// The result of one full walk: the scope tree plus the flat fact tables
/// the global hoister and duplicate-literal hoister need that a scope
/// tree alone doesn't carry (spec.md §4.2's trueGlobals/typeofGuarded/
/// dotObjectUses, and §4.3's per-category literal occurrences).
pub struct Analysis {
    pub scopes: ScopeTree,
    /// Byte offset of every `typeof X` operand identifier, by name.
    pub typeof_guarded: std::collections::HashSet<String>,
    /// name -> every (start, end) span of an Identifier that is the object
    /// of a non-computed member expression (`X.foo`).
    pub dot_object_uses: std::collections::HashMap<String, Vec<(u32, u32)>>,
}

/// Walk `program` and build its [`Analysis`].
pub fn analyze(program: &Program<'_>) -> Analysis {
    let mut ctx = Walker {
        scopes: ScopeTree::new(),
        typeof_guarded: std::collections::HashSet::new(),
        dot_object_uses: std::collections::HashMap::new(),
    };
    let root = ctx.scopes.root();
    for stmt in &program.body {
        ctx.walk_statement(stmt, root);
    }
    Analysis {
        scopes: ctx.scopes,
        typeof_guarded: ctx.typeof_guarded,
        dot_object_uses: ctx.dot_object_uses,
    }
}

struct Walker {
    scopes: ScopeTree,
    typeof_guarded: std::collections::HashSet<String>,
    dot_object_uses: std::collections::HashMap<String, Vec<(u32, u32)>>,
}

impl Walker {
    fn walk_statement(&mut self, stmt: &Statement<'_>, scope: ScopeId) {
        match stmt {
            Statement::ExpressionStatement(s) => self.walk_expression(&s.expression, scope),
            Statement::VariableDeclaration(decl) => {
                let kind = match decl.kind {
                    oxc_ast::ast::VariableDeclarationKind::Var => BindingKind::Var,
                    oxc_ast::ast::VariableDeclarationKind::Let => BindingKind::Let,
                    oxc_ast::ast::VariableDeclarationKind::Const => BindingKind::Const,
                    _ => BindingKind::Let,
                };
                for d in &decl.declarations {
                    self.bind_pattern(&d.id.kind, kind, scope);
                    if let Some(init) = &d.init {
                        self.walk_expression(init, scope);
                    }
                }
            }
            Statement::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    self.scopes.add_binding(
                        scope,
                        id.name.as_str().into(),
                        BindingKind::FunctionDecl,
                        id.span().start,
                    );
                }
                let fn_scope = self.scopes.push_scope(ScopeKind::Function, scope);
                for param in &func.params.items {
                    self.bind_pattern(&param.pattern.kind, BindingKind::Param, fn_scope);
                }
                if let Some(body) = &func.body {
                    for s in &body.statements {
                        self.walk_statement(s, fn_scope);
                    }
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.scopes.add_binding(
                        scope,
                        id.name.as_str().into(),
                        BindingKind::ClassDecl,
                        id.span().start,
                    );
                }
                for element in &class.body.body {
                    if let oxc_ast::ast::ClassElement::MethodDefinition(method) = element {
                        if let Some(body) = &method.value.body {
                            let fn_scope = self.scopes.push_scope(ScopeKind::Function, scope);
                            for param in &method.value.params.items {
                                self.bind_pattern(&param.pattern.kind, BindingKind::Param, fn_scope);
                            }
                            for s in &body.statements {
                                self.walk_statement(s, fn_scope);
                            }
                        }
                    }
                }
            }
            Statement::ForInStatement(for_in) => {
                let inner = self.scopes.push_scope(ScopeKind::Block, scope);
                if let oxc_ast::ast::ForStatementLeft::VariableDeclaration(decl) = &for_in.left {
                    let kind = match decl.kind {
                        oxc_ast::ast::VariableDeclarationKind::Var => BindingKind::Var,
                        oxc_ast::ast::VariableDeclarationKind::Const => BindingKind::Const,
                        _ => BindingKind::Let,
                    };
                    for d in &decl.declarations {
                        self.bind_pattern(&d.id.kind, kind, inner);
                    }
                }
                self.walk_expression(&for_in.right, inner);
                self.walk_statement(&for_in.body, inner);
            }
            Statement::ForOfStatement(for_of) => {
                let inner = self.scopes.push_scope(ScopeKind::Block, scope);
                if let oxc_ast::ast::ForStatementLeft::VariableDeclaration(decl) = &for_of.left {
                    let kind = match decl.kind {
                        oxc_ast::ast::VariableDeclarationKind::Var => BindingKind::Var,
                        oxc_ast::ast::VariableDeclarationKind::Const => BindingKind::Const,
                        _ => BindingKind::Let,
                    };
                    for d in &decl.declarations {
                        self.bind_pattern(&d.id.kind, kind, inner);
                    }
                }
                self.walk_expression(&for_of.right, inner);
                self.walk_statement(&for_of.body, inner);
            }
            Statement::ThrowStatement(throw) => {
                self.walk_expression(&throw.argument, scope);
            }
            Statement::SwitchStatement(switch_stmt) => {
                self.walk_expression(&switch_stmt.discriminant, scope);
                let inner = self.scopes.push_scope(ScopeKind::Block, scope);
                for case in &switch_stmt.cases {
                    if let Some(test) = &case.test {
                        self.walk_expression(test, inner);
                    }
                    for s in &case.consequent {
                        self.walk_statement(s, inner);
                    }
                }
            }
            Statement::ReturnStatement(ret) => {
                if let Some(arg) = &ret.argument {
                    self.walk_expression(arg, scope);
                }
            }
            Statement::BlockStatement(block) => {
                let inner = self.scopes.push_scope(ScopeKind::Block, scope);
                for s in &block.body {
                    self.walk_statement(s, inner);
                }
            }
            Statement::IfStatement(if_stmt) => {
                self.walk_expression(&if_stmt.test, scope);
                self.walk_statement(&if_stmt.consequent, scope);
                if let Some(alt) = &if_stmt.alternate {
                    self.walk_statement(alt, scope);
                }
            }
            Statement::ForStatement(for_stmt) => {
                let inner = self.scopes.push_scope(ScopeKind::Block, scope);
                if let Some(oxc_ast::ast::ForStatementInit::VariableDeclaration(decl)) =
                    &for_stmt.init
                {
                    let kind = match decl.kind {
                        oxc_ast::ast::VariableDeclarationKind::Var => BindingKind::Var,
                        oxc_ast::ast::VariableDeclarationKind::Const => BindingKind::Const,
                        _ => BindingKind::Let,
                    };
                    for d in &decl.declarations {
                        self.bind_pattern(&d.id.kind, kind, inner);
                    }
                }
                if let Some(test) = &for_stmt.test {
                    self.walk_expression(test, inner);
                }
                self.walk_statement(&for_stmt.body, inner);
            }
            Statement::WhileStatement(w) => {
                self.walk_expression(&w.test, scope);
                self.walk_statement(&w.body, scope);
            }
            Statement::DoWhileStatement(d) => {
                self.walk_statement(&d.body, scope);
                self.walk_expression(&d.test, scope);
            }
            Statement::TryStatement(try_stmt) => {
                let block_scope = self.scopes.push_scope(ScopeKind::Block, scope);
                for s in &try_stmt.block.body {
                    self.walk_statement(s, block_scope);
                }
                if let Some(handler) = &try_stmt.handler {
                    let catch_scope = self.scopes.push_scope(ScopeKind::Catch, scope);
                    if let Some(param) = &handler.param {
                        self.bind_pattern(&param.pattern.kind, BindingKind::CatchParam, catch_scope);
                    }
                    for s in &handler.body.body {
                        self.walk_statement(s, catch_scope);
                    }
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    let fin_scope = self.scopes.push_scope(ScopeKind::Block, scope);
                    for s in &finalizer.body {
                        self.walk_statement(s, fin_scope);
                    }
                }
            }
            _ => {}
        }
    }

    fn bind_pattern(
        &mut self,
        pattern: &BindingPatternKind<'_>,
        kind: BindingKind,
        scope: ScopeId,
    ) {
        match pattern {
            BindingPatternKind::BindingIdentifier(id) => {
                self.scopes
                    .add_binding(scope, id.name.as_str().into(), kind, id.span().start);
            }
            BindingPatternKind::ObjectPattern(obj) => {
                for prop in &obj.properties {
                    self.bind_pattern(&prop.value.kind, kind, scope);
                }
                if let Some(rest) = &obj.rest {
                    self.bind_pattern(&rest.argument.kind, kind, scope);
                }
            }
            BindingPatternKind::ArrayPattern(arr) => {
                for elem in arr.elements.iter().flatten() {
                    self.bind_pattern(&elem.kind, kind, scope);
                }
                if let Some(rest) = &arr.rest {
                    self.bind_pattern(&rest.argument.kind, kind, scope);
                }
            }
            BindingPatternKind::AssignmentPattern(assign) => {
                self.bind_pattern(&assign.left.kind, kind, scope);
            }
        }
    }

    fn walk_expression(&mut self, expr: &Expression<'_>, scope: ScopeId) {
        match expr {
            Expression::Identifier(id) => {
                self.scopes
                    .record_reference(scope, id.name.as_str(), id.span().start);
            }
            Expression::ArrowFunctionExpression(arrow) => {
                let fn_scope = self.scopes.push_scope(ScopeKind::Function, scope);
                for param in &arrow.params.items {
                    self.bind_pattern(&param.pattern.kind, BindingKind::Param, fn_scope);
                }
                for s in &arrow.body.statements {
                    self.walk_statement(s, fn_scope);
                }
            }
            Expression::FunctionExpression(func) => {
                let fn_scope = self.scopes.push_scope(ScopeKind::Function, scope);
                for param in &func.params.items {
                    self.bind_pattern(&param.pattern.kind, BindingKind::Param, fn_scope);
                }
                if let Some(body) = &func.body {
                    for s in &body.statements {
                        self.walk_statement(s, fn_scope);
                    }
                }
            }
            Expression::CallExpression(call) => {
                self.walk_expression(&call.callee, scope);
                for arg in &call.arguments {
                    if let Some(e) = arg.as_expression() {
                        self.walk_expression(e, scope);
                    }
                }
            }
            Expression::StaticMemberExpression(member) => {
                if let Expression::Identifier(obj_id) = &member.object {
                    self.dot_object_uses
                        .entry(obj_id.name.as_str().to_string())
                        .or_default()
                        .push((member.span().start, member.span().end));
                }
                self.walk_expression(&member.object, scope);
            }
            Expression::ComputedMemberExpression(member) => {
                self.walk_expression(&member.object, scope);
                self.walk_expression(&member.expression, scope);
            }
            Expression::ConditionalExpression(cond) => {
                self.walk_expression(&cond.test, scope);
                self.walk_expression(&cond.consequent, scope);
                self.walk_expression(&cond.alternate, scope);
            }
            Expression::LogicalExpression(logical) => {
                self.walk_expression(&logical.left, scope);
                self.walk_expression(&logical.right, scope);
            }
            Expression::BinaryExpression(binary) => {
                self.walk_expression(&binary.left, scope);
                self.walk_expression(&binary.right, scope);
            }
            Expression::UnaryExpression(unary) => {
                if unary.operator == UnaryOperator::Typeof {
                    if let Expression::Identifier(id) = &unary.argument {
                        self.typeof_guarded.insert(id.name.as_str().to_string());
                    }
                }
                self.walk_expression(&unary.argument, scope);
            }
            Expression::ArrayExpression(arr) => {
                for elem in &arr.elements {
                    if let Some(e) = elem.as_expression() {
                        self.walk_expression(e, scope);
                    }
                }
            }
            Expression::ObjectExpression(obj) => {
                for prop in &obj.properties {
                    if let oxc_ast::ast::ObjectPropertyKind::ObjectProperty(p) = prop {
                        if let Some(key_expr) = p.key.as_expression() {
                            self.walk_expression(key_expr, scope);
                        }
                        if !p.shorthand {
                            self.walk_expression(&p.value, scope);
                        }
                    }
                }
            }
            Expression::AssignmentExpression(assign) => {
                self.walk_assignment_target(&assign.left, scope);
                self.walk_expression(&assign.right, scope);
            }
            Expression::SequenceExpression(seq) => {
                for e in &seq.expressions {
                    self.walk_expression(e, scope);
                }
            }
            Expression::ParenthesizedExpression(paren) => {
                self.walk_expression(&paren.expression, scope);
            }
            Expression::AwaitExpression(await_expr) => {
                self.walk_expression(&await_expr.argument, scope);
            }
            Expression::NewExpression(new_expr) => {
                self.walk_expression(&new_expr.callee, scope);
                for arg in &new_expr.arguments {
                    if let Some(e) = arg.as_expression() {
                        self.walk_expression(e, scope);
                    }
                }
            }
            Expression::TemplateLiteral(template) => {
                for e in &template.expressions {
                    self.walk_expression(e, scope);
                }
            }
            Expression::TaggedTemplateExpression(tagged) => {
                self.walk_expression(&tagged.tag, scope);
                for e in &tagged.quasi.expressions {
                    self.walk_expression(e, scope);
                }
            }
            Expression::JSXElement(jsx) => self.walk_jsx_element(jsx, scope),
            Expression::JSXFragment(frag) => {
                for child in &frag.children {
                    self.walk_jsx_child(child, scope);
                }
            }
            _ => {}
        }
    }

    /// JSX has no walker precedent anywhere in the corpus this crate was
    /// built from; this follows the same shape as the rest of this walker
    /// (record identifiers, descend into child expressions) rather than
    /// any borrowed reference implementation.
    fn walk_jsx_element(&mut self, jsx: &oxc_ast::ast::JSXElement<'_>, scope: ScopeId) {
        if let oxc_ast::ast::JSXElementName::IdentifierReference(id) = &jsx.opening_element.name {
            self.scopes
                .record_reference(scope, id.name.as_str(), id.span().start);
        }
        for attr in &jsx.opening_element.attributes {
            match attr {
                oxc_ast::ast::JSXAttributeItem::Attribute(a) => {
                    if let Some(oxc_ast::ast::JSXAttributeValue::ExpressionContainer(container)) =
                        &a.value
                    {
                        if let Some(e) = container.expression.as_expression() {
                            self.walk_expression(e, scope);
                        }
                    }
                }
                oxc_ast::ast::JSXAttributeItem::SpreadAttribute(s) => {
                    self.walk_expression(&s.argument, scope);
                }
            }
        }
        for child in &jsx.children {
            self.walk_jsx_child(child, scope);
        }
    }

    fn walk_jsx_child(&mut self, child: &oxc_ast::ast::JSXChild<'_>, scope: ScopeId) {
        match child {
            oxc_ast::ast::JSXChild::Element(el) => self.walk_jsx_element(el, scope),
            oxc_ast::ast::JSXChild::ExpressionContainer(container) => {
                if let Some(e) = container.expression.as_expression() {
                    self.walk_expression(e, scope);
                }
            }
            oxc_ast::ast::JSXChild::Fragment(frag) => {
                for c in &frag.children {
                    self.walk_jsx_child(c, scope);
                }
            }
            _ => {}
        }
    }

    fn walk_assignment_target(&mut self, target: &AssignmentTarget<'_>, scope: ScopeId) {
        if let AssignmentTarget::AssignmentTargetIdentifier(id) = target {
            self.scopes.record_reassignment(scope, id.name.as_str());
            self.scopes
                .record_reference(scope, id.name.as_str(), id.span().start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn analyze_source(src: &str) -> Analysis {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::default().with_module(true)).parse();
        analyze(&ret.program)
    }

    fn find_binding<'a>(
        analysis: &'a Analysis,
        name: &str,
    ) -> Option<&'a niu_croquis::scope::ScopeBinding> {
        (0..analysis.scopes.scope_count())
            .find_map(|i| analysis.scopes.scope(ScopeId::new(i as u32)).binding(name))
    }

    #[test]
    fn free_identifier_becomes_global() {
        let analysis = analyze_source("Array.isArray(x); Array.from(y);");
        let globals = analysis.scopes.globals_by_reference_count();
        assert!(globals.iter().any(|(name, _)| *name == "Array"));
    }

    #[test]
    fn dot_access_on_global_is_recorded() {
        let analysis = analyze_source("Array.isArray(x); Array.from(y);");
        assert_eq!(analysis.dot_object_uses.get("Array").map(Vec::len), Some(2));
    }

    #[test]
    fn typeof_guarded_identifier_is_flagged() {
        let analysis = analyze_source("if (typeof Foo !== 'undefined') { Foo.bar(); }");
        assert!(analysis.typeof_guarded.contains("Foo"));
    }

    #[test]
    fn block_scoped_let_does_not_leak_to_sibling() {
        let analysis = analyze_source("{ let x = 1; } { x; }");
        let globals = analysis.scopes.globals_by_reference_count();
        assert!(globals.iter().any(|(name, _)| *name == "x"));
    }

    #[test]
    fn switch_and_new_record_param_references() {
        let analysis =
            analyze_source("function f(x) { switch (x) { case 1: return new Array(x); } }");
        let binding = find_binding(&analysis, "x").expect("param x should be bound");
        assert!(
            binding.references.len() >= 2,
            "switch discriminant and new-expression argument must both record `x`"
        );
    }

    #[test]
    fn for_in_and_for_of_bindings_are_scoped() {
        let analysis = analyze_source("for (const k in obj) { use(k); } for (const v of arr) { use(v); }");
        let globals = analysis.scopes.globals_by_reference_count();
        assert!(globals.iter().any(|(name, _)| *name == "obj"));
        assert!(globals.iter().any(|(name, _)| *name == "arr"));
        assert!(globals.iter().any(|(name, _)| *name == "use"));
        assert!(!globals.iter().any(|(name, _)| *name == "k"));
        assert!(!globals.iter().any(|(name, _)| *name == "v"));
    }

    #[test]
    fn class_method_body_is_walked() {
        let analysis = analyze_source("class C { m(y) { return Helper.use(y); } }");
        assert!(analysis.dot_object_uses.contains_key("Helper"));
    }

    #[test]
    fn throw_argument_is_walked() {
        let analysis = analyze_source("function f(x) { throw new Error(x); }");
        let binding = find_binding(&analysis, "x").expect("param x should be bound");
        assert!(!binding.references.is_empty());
    }
}
