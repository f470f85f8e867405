//! The duplicate-literal hoister (spec.md §4.3).
//!
//! Walks the program once, bucketing every eligible string occurrence by
//! category (plain literal / dot-access / identifier-key — `bracketAccess`
//! and `stringKey` cost exactly like a plain literal use and are folded
//! into that bucket) and every non-string literal by `(kind, value)`,
//! then hoists whichever values clear the selective-profit bar.

use std::collections::HashMap;

use niu_croquis::profit::{self, LiteralKind, StringDecision, StringOccurrences};

use crate::rewrite::{apply_splices, Splice};
use crate::text::json_quote_len;

#[derive(Debug, Clone, Copy)]
enum StringOccurrenceSite {
    /// A plain literal / bracket-access / computed-string-key use: the
    /// whole quoted literal is replaced by the placeholder identifier.
    Literal { start: u32, end: u32 },
    /// `obj.prop`: the span covers `.prop` and is replaced by
    /// `[placeholder]`.
    DotAccess { start: u32, end: u32 },
    /// `{ prop: v }`: the span covers the bare key `prop` and is replaced
    /// by `[placeholder]`.
    IdentifierKey { start: u32, end: u32 },
}

#[derive(Default)]
struct Collected {
    strings: HashMap<String, Vec<StringOccurrenceSite>>,
    non_strings: HashMap<(NonStringKind, String), Vec<(u32, u32)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NonStringKind {
    Number,
    True,
    False,
    Null,
    Undefined,
    BigInt,
}

fn collect(program: &oxc_ast::ast::Program<'_>) -> Collected {
    use oxc_ast::ast::{Expression, ObjectPropertyKind, Statement};
    use oxc_span::GetSpan;

    let mut out = Collected::default();

    fn walk_stmt(stmt: &Statement<'_>, out: &mut Collected) {
        match stmt {
            Statement::ExpressionStatement(s) => walk_expr(&s.expression, out),
            Statement::VariableDeclaration(decl) => {
                for d in &decl.declarations {
                    if let Some(init) = &d.init {
                        walk_expr(init, out);
                    }
                }
            }
            Statement::ReturnStatement(r) => {
                if let Some(arg) = &r.argument {
                    walk_expr(arg, out);
                }
            }
            Statement::BlockStatement(b) => {
                for s in &b.body {
                    walk_stmt(s, out);
                }
            }
            Statement::IfStatement(i) => {
                walk_expr(&i.test, out);
                walk_stmt(&i.consequent, out);
                if let Some(alt) = &i.alternate {
                    walk_stmt(alt, out);
                }
            }
            Statement::FunctionDeclaration(f) => {
                if let Some(body) = &f.body {
                    for s in &body.statements {
                        walk_stmt(s, out);
                    }
                }
            }
            Statement::WhileStatement(w) => {
                walk_expr(&w.test, out);
                walk_stmt(&w.body, out);
            }
            Statement::ForStatement(f) => walk_stmt(&f.body, out),
            _ => {}
        }
    }

    fn walk_expr(expr: &Expression<'_>, out: &mut Collected) {
        match expr {
            Expression::StringLiteral(lit) => {
                out.strings
                    .entry(lit.value.as_str().to_string())
                    .or_default()
                    .push(StringOccurrenceSite::Literal {
                        start: lit.span().start,
                        end: lit.span().end,
                    });
            }
            Expression::NumericLiteral(lit) => {
                let span = lit.span();
                let text = &lit.raw.as_deref().unwrap_or("").to_string();
                if text.len() > 2 {
                    out.non_strings
                        .entry((NonStringKind::Number, text.clone()))
                        .or_default()
                        .push((span.start, span.end));
                }
            }
            Expression::BooleanLiteral(lit) => {
                let kind = if lit.value {
                    NonStringKind::True
                } else {
                    NonStringKind::False
                };
                out.non_strings
                    .entry((kind, lit.value.to_string()))
                    .or_default()
                    .push((lit.span().start, lit.span().end));
            }
            Expression::NullLiteral(lit) => {
                out.non_strings
                    .entry((NonStringKind::Null, "null".to_string()))
                    .or_default()
                    .push((lit.span().start, lit.span().end));
            }
            Expression::Identifier(id) if id.name == "undefined" => {
                out.non_strings
                    .entry((NonStringKind::Undefined, "undefined".to_string()))
                    .or_default()
                    .push((id.span().start, id.span().end));
            }
            Expression::BigIntLiteral(lit) => {
                out.non_strings
                    .entry((NonStringKind::BigInt, lit.raw.to_string()))
                    .or_default()
                    .push((lit.span().start, lit.span().end));
            }
            Expression::StaticMemberExpression(member) => {
                walk_expr(&member.object, out);
                // `.prop` -> the dot plus the property name.
                let prop_span = member.property.span();
                let start = prop_span.start - 1; // include the '.'
                out.strings
                    .entry(member.property.name.as_str().to_string())
                    .or_default()
                    .push(StringOccurrenceSite::DotAccess {
                        start,
                        end: prop_span.end,
                    });
            }
            Expression::ComputedMemberExpression(member) => {
                walk_expr(&member.object, out);
                walk_expr(&member.expression, out);
            }
            Expression::CallExpression(call) => {
                walk_expr(&call.callee, out);
                for arg in &call.arguments {
                    if let Some(e) = arg.as_expression() {
                        walk_expr(e, out);
                    }
                }
            }
            Expression::ObjectExpression(obj) => {
                for prop in &obj.properties {
                    if let ObjectPropertyKind::ObjectProperty(p) = prop {
                        if !p.computed && !p.shorthand && !p.method {
                            if let oxc_ast::ast::PropertyKey::StaticIdentifier(key) = &p.key {
                                out.strings
                                    .entry(key.name.as_str().to_string())
                                    .or_default()
                                    .push(StringOccurrenceSite::IdentifierKey {
                                        start: key.span().start,
                                        end: key.span().end,
                                    });
                            }
                        }
                        walk_expr(&p.value, out);
                    }
                }
            }
            Expression::ArrayExpression(arr) => {
                for elem in &arr.elements {
                    if let Some(e) = elem.as_expression() {
                        walk_expr(e, out);
                    }
                }
            }
            Expression::BinaryExpression(b) => {
                walk_expr(&b.left, out);
                walk_expr(&b.right, out);
            }
            Expression::LogicalExpression(b) => {
                walk_expr(&b.left, out);
                walk_expr(&b.right, out);
            }
            Expression::ConditionalExpression(c) => {
                walk_expr(&c.test, out);
                walk_expr(&c.consequent, out);
                walk_expr(&c.alternate, out);
            }
            Expression::AssignmentExpression(a) => walk_expr(&a.right, out),
            Expression::ArrowFunctionExpression(a) => {
                for s in &a.body.statements {
                    walk_stmt(s, out);
                }
            }
            _ => {}
        }
    }

    for stmt in &program.body {
        walk_stmt(stmt, &mut out);
    }
    out
}

/// One string value selected for hoisting.
struct StringPlan {
    value: String,
    decision: StringDecision,
    sites: Vec<StringOccurrenceSite>,
}

pub struct LiteralHoistResult {
    pub code: String,
    pub hoisted_count: usize,
}

pub fn run(source: &str, program: &oxc_ast::ast::Program<'_>) -> LiteralHoistResult {
    let collected = collect(program);

    // --- strings ---
    let mut decisions: Vec<StringPlan> = Vec::new();
    for (value, sites) in collected.strings {
        let occ = StringOccurrences {
            literal_uses: sites
                .iter()
                .filter(|s| matches!(s, StringOccurrenceSite::Literal { .. }))
                .count(),
            dot_access_uses: sites
                .iter()
                .filter(|s| matches!(s, StringOccurrenceSite::DotAccess { .. }))
                .count(),
            identifier_key_uses: sites
                .iter()
                .filter(|s| matches!(s, StringOccurrenceSite::IdentifierKey { .. }))
                .count(),
        };
        let quoted_len = json_quote_len(&value);
        let decision = profit::selective_string_profit(occ, quoted_len, 1, false);
        if decision.effective_count >= 2 && decision.profit > -2 {
            decisions.push(StringPlan {
                value,
                decision,
                sites,
            });
        }
    }

    let profitable: Vec<usize> = (0..decisions.len())
        .filter(|&i| decisions[i].decision.profit > 0)
        .collect();
    let marginal: Vec<usize> = (0..decisions.len())
        .filter(|&i| decisions[i].decision.profit <= 0)
        .collect();

    let mut selected: Vec<usize> = if profitable.len() >= 7 {
        profitable
    } else if profitable.len() + marginal.len() >= 7 {
        let mut both = profitable;
        both.extend(marginal);
        both
    } else {
        profitable
    };

    selected.sort_by(|&a, &b| decisions[b].decision.effective_count.cmp(&decisions[a].decision.effective_count));

    // First-declaration gate: the first selected candidate must recoup the
    // 5-byte `const ` overhead on its own.
    let mut ordered = Vec::new();
    let mut deferred = Vec::new();
    let mut has_first = false;
    for idx in selected {
        if !has_first {
            if decisions[idx].decision.profit - 5 > 0 {
                ordered.push(idx);
                has_first = true;
            } else {
                deferred.push(idx);
            }
        } else {
            ordered.push(idx);
        }
    }
    if has_first {
        ordered.extend(deferred);
    }
    // If nothing ever recouped the first-slot overhead, nothing is hoisted.
    let selected = if has_first { ordered } else { Vec::new() };

    let mut splices = Vec::new();
    let mut placeholders = Vec::new();
    let mut string_values = Vec::new();

    for (i, idx) in selected.iter().enumerate() {
        let plan = &decisions[*idx];
        let placeholder = format!("__niu_literal_{i}__");
        for site in &plan.sites {
            match site {
                StringOccurrenceSite::Literal { start, end } if plan.decision.hoist_literals => {
                    splices.push(Splice::new(*start, *end, placeholder.clone()));
                }
                StringOccurrenceSite::DotAccess { start, end } if plan.decision.hoist_access => {
                    splices.push(Splice::new(*start, *end, format!("[{placeholder}]")));
                }
                StringOccurrenceSite::IdentifierKey { start, end }
                    if plan.decision.hoist_keys =>
                {
                    splices.push(Splice::new(*start, *end, format!("[{placeholder}]")));
                }
                _ => {}
            }
        }
        placeholders.push(placeholder);
        string_values.push(plan.value.clone());
    }

    // --- non-strings ---
    let mut non_string_placeholders = Vec::new();
    let mut non_string_values = Vec::new();
    for ((_, repr), spans) in &collected.non_strings {
        if spans.len() < 2 {
            continue;
        }
        let r = repr.len();
        if r <= 2 {
            continue; // single/two-digit numbers never profitably hoist
        }
        let profit = profit::literal_hoist_profit(spans.len(), r, 1, placeholders.is_empty());
        if profit <= 0 {
            continue;
        }
        let placeholder = format!("__niu_literal_{}__", placeholders.len() + non_string_placeholders.len());
        for &(start, end) in spans {
            splices.push(Splice::new(start, end, placeholder.clone()));
        }
        non_string_placeholders.push(placeholder);
        non_string_values.push(repr.clone());
    }

    let hoisted_count = placeholders.len() + non_string_placeholders.len();
    if hoisted_count == 0 {
        return LiteralHoistResult {
            code: source.to_string(),
            hoisted_count,
        };
    }

    // Split-packing: only strings participate, only when >= 7 string
    // bindings were selected and a usable single-byte delimiter exists.
    let split_decl = (placeholders.len() >= 7)
        .then(|| choose_delimiter(&string_values))
        .flatten()
        .map(|delim| {
            let packed = string_values.join(&delim.to_string());
            format!(
                "let [{}]=\"{}\".split(\"{}\");",
                placeholders.join(","),
                packed.replace('\\', "\\\\").replace('"', "\\\""),
                delim
            )
        });

    let mut decl = String::new();
    if let Some(split) = split_decl {
        decl.push_str(&split);
    } else if !placeholders.is_empty() {
        decl.push_str("const ");
        decl.push_str(
            &placeholders
                .iter()
                .zip(string_values.iter())
                .map(|(p, v)| format!("{p}={}", crate::text::json_quote(v)))
                .collect::<Vec<_>>()
                .join(","),
        );
        decl.push(';');
    }
    if !non_string_placeholders.is_empty() {
        decl.push_str("const ");
        decl.push_str(
            &non_string_placeholders
                .iter()
                .zip(non_string_values.iter())
                .map(|(p, v)| format!("{p}={v}"))
                .collect::<Vec<_>>()
                .join(","),
        );
        decl.push(';');
    }
    splices.push(Splice::new(0, 0, decl));

    LiteralHoistResult {
        code: apply_splices(source, splices),
        hoisted_count,
    }
}

/// Delimiter preference order (spec.md §4.3 "Emission"): first try the
/// punctuation set, then fall back to any printable ASCII byte that is
/// not a string-escape trigger.
fn choose_delimiter(values: &[String]) -> Option<char> {
    const PREFERRED: &str = ",;:|!@#$%^&*~`<>?/-_=+.()[]{}";
    for c in PREFERRED.chars() {
        if values.iter().all(|v| !v.contains(c)) {
            return Some(c);
        }
    }
    for byte in 32u8..=126 {
        let c = byte as char;
        if matches!(c, '"' | '\'' | '\\') {
            continue;
        }
        if values.iter().all(|v| !v.contains(c)) {
            return Some(c);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn run_source(src: &str) -> LiteralHoistResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::default().with_module(true)).parse();
        run(src, &ret.program)
    }

    #[test]
    fn three_copies_breaks_even() {
        let result = run_source(r#"x="abc";y="abc";z="abc";"#);
        assert_eq!(result.code.matches("\"abc\"").count(), 3);
    }

    #[test]
    fn five_copies_hoists_to_one_declaration() {
        let src = (0..5)
            .map(|_| "console.log(\"hello\");".to_string())
            .collect::<String>();
        let result = run_source(&src);
        assert_eq!(result.code.matches("\"hello\"").count(), 1);
        assert!(result.code.starts_with("const "));
    }

    #[test]
    fn ten_short_dot_uses_are_left_alone() {
        let src = (0..10).map(|_| "obj.x;".to_string()).collect::<String>();
        let result = run_source(&src);
        assert_eq!(result.code.matches("obj.x").count(), 10);
    }

    #[test]
    fn ten_long_dot_uses_are_hoisted() {
        let src = (0..10)
            .map(|_| "obj.something;".to_string())
            .collect::<String>();
        let result = run_source(&src);
        assert_eq!(result.code.matches("\"something\"").count(), 1);
        assert_eq!(result.code.matches("obj[__niu_literal_0__]").count(), 10);
    }
}
