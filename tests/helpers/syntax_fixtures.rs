//! Small builders for hand-made expression parse trees.

use bsl_ls::syntax::{GreenNodeBuilder, SyntaxKind, SyntaxNode};

/// Wraps a [`GreenNodeBuilder`] with shorthand for the shapes tests need.
pub struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
        }
    }

    pub fn node(&mut self, kind: SyntaxKind, children: impl FnOnce(&mut Self)) -> &mut Self {
        self.inner.start_node(kind.into());
        children(self);
        self.inner.finish_node();
        self
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        self.inner.token(kind.into(), text);
        self
    }

    pub fn name_ref(&mut self, name: &str) -> &mut Self {
        self.node(SyntaxKind::NAME_REF, |b| {
            b.token(SyntaxKind::IDENT, name);
        })
    }

    pub fn literal(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        self.node(SyntaxKind::LITERAL, |b| {
            b.token(kind, text);
        })
    }

    /// `( a, b, ... )` where each closure emits one argument node.
    pub fn arg_list(&mut self, arguments: Vec<Box<dyn FnOnce(&mut Self)>>) -> &mut Self {
        self.node(SyntaxKind::ARG_LIST, |b| {
            b.token(SyntaxKind::L_PAREN, "(");
            for (i, argument) in arguments.into_iter().enumerate() {
                if i > 0 {
                    b.token(SyntaxKind::COMMA, ",");
                    b.token(SyntaxKind::WHITESPACE, " ");
                }
                argument(b);
            }
            b.token(SyntaxKind::R_PAREN, ")");
        })
    }

    pub fn finish(self) -> SyntaxNode {
        SyntaxNode::new_root(self.inner.finish())
    }
}

/// `New <type_name>(<arguments>)`.
pub fn static_new(type_name: &str, arguments: Vec<Box<dyn FnOnce(&mut TreeBuilder)>>) -> SyntaxNode {
    let mut builder = TreeBuilder::new();
    builder.node(SyntaxKind::NEW_EXPR, |b| {
        b.token(SyntaxKind::NEW_KW, "New");
        b.token(SyntaxKind::WHITESPACE, " ");
        b.node(SyntaxKind::TYPE_NAME, |b| {
            b.token(SyntaxKind::IDENT, type_name);
        });
        b.arg_list(arguments);
    });
    builder.finish()
}

/// `New(<type expression>, <arguments>)`.
pub fn dynamic_new(type_name: Box<dyn FnOnce(&mut TreeBuilder)>, arguments: Vec<Box<dyn FnOnce(&mut TreeBuilder)>>) -> SyntaxNode {
    let mut builder = TreeBuilder::new();
    builder.node(SyntaxKind::NEW_EXPR, |b| {
        b.token(SyntaxKind::NEW_KW, "New");
        let mut all = vec![type_name];
        all.extend(arguments);
        b.arg_list(all);
    });
    builder.finish()
}

/// Box one argument emitter.
pub fn arg(emit: impl FnOnce(&mut TreeBuilder) + 'static) -> Box<dyn FnOnce(&mut TreeBuilder)> {
    Box::new(emit)
}
