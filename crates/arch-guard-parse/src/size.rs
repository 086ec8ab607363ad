//! Per-package size metric, consumed by the core only as an opaque budget
//! check (`Configuration::size`).
//!
//! Counts top-level items and the statements inside function bodies,
//! `syn`'s analogue of the original's `go/ast` declaration/statement
//! counting (`size/decl.go`, `size/stmt.go`): each function, type, or
//! constant declaration counts for at least one unit, plus one unit per
//! statement in a function body, so a package's size tracks how much is
//! actually written rather than its byte count.

use syn::{Block, Item, Stmt};

/// Computes the size of a single parsed file: the sum of
/// [`size_of_item`] over every top-level item.
#[must_use]
pub fn size_of_file(file: &syn::File) -> u32 {
    file.items.iter().map(size_of_item).sum()
}

/// Computes the size contribution of one top-level item.
#[must_use]
pub fn size_of_item(item: &Item) -> u32 {
    match item {
        Item::Fn(f) => 1 + size_of_block(&f.block),
        Item::Struct(s) => 1 + field_count(&s.fields),
        Item::Enum(e) => 1 + e.variants.len() as u32,
        Item::Trait(t) => 1 + t.items.len() as u32,
        Item::Impl(i) => 1 + i.items.len() as u32,
        Item::Const(_) | Item::Static(_) | Item::Type(_) => 1,
        Item::Mod(m) => m
            .content
            .as_ref()
            .map_or(1, |(_, items)| 1 + items.iter().map(size_of_item).sum::<u32>()),
        _ => 1,
    }
}

fn field_count(fields: &syn::Fields) -> u32 {
    match fields {
        syn::Fields::Named(n) => n.named.len() as u32,
        syn::Fields::Unnamed(u) => u.unnamed.len() as u32,
        syn::Fields::Unit => 0,
    }
}

fn size_of_block(block: &Block) -> u32 {
    block.stmts.iter().map(size_of_stmt).sum()
}

fn size_of_stmt(stmt: &Stmt) -> u32 {
    match stmt {
        Stmt::Local(local) => 1 + local.init.as_ref().map_or(0, |_| 1),
        Stmt::Item(item) => size_of_item(item),
        Stmt::Expr(expr, _) => 1 + size_of_expr_blocks(expr),
        Stmt::Macro(_) => 1,
    }
}

/// Nested blocks (`if`/`else`/`match`/loops) contribute the size of their
/// own statements; this keeps large control-flow bodies from being
/// undercounted as a single unit.
fn size_of_expr_blocks(expr: &syn::Expr) -> u32 {
    match expr {
        syn::Expr::If(e) => {
            size_of_block(&e.then_branch)
                + e.else_branch
                    .as_ref()
                    .map_or(0, |(_, b)| size_of_expr_blocks(b))
        }
        syn::Expr::Block(e) => size_of_block(&e.block),
        syn::Expr::Match(e) => e.arms.len() as u32,
        syn::Expr::ForLoop(e) => size_of_block(&e.body),
        syn::Expr::While(e) => size_of_block(&e.body),
        syn::Expr::Loop(e) => size_of_block(&e.body),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> syn::File {
        syn::parse_file(src).unwrap()
    }

    #[test]
    fn empty_file_has_zero_size() {
        assert_eq!(size_of_file(&parse("")), 0);
    }

    #[test]
    fn function_counts_itself_plus_its_statements() {
        let file = parse("fn f() { let x = 1; let y = 2; }");
        assert_eq!(size_of_file(&file), 1 + 2 * 2);
    }

    #[test]
    fn nested_if_else_counts_both_branches() {
        let file = parse("fn f() { if true { let a = 1; } else { let b = 2; } }");
        // fn(1) + if-stmt(1) + then-branch(2) + else-branch(2)
        assert_eq!(size_of_file(&file), 1 + 1 + 2 + 2);
    }

    #[test]
    fn struct_counts_its_fields() {
        let file = parse("struct S { a: u32, b: u32 }");
        assert_eq!(size_of_file(&file), 1 + 2);
    }
}
