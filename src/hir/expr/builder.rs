//! Lowering from the parse tree to the expression tree.

use tracing::trace;

use super::{
    BinaryOperationNode, BinaryOperator, CallNode, ConstructorCallNode, Expression, LiteralKind,
    MethodCallNode, TerminalSymbolNode, UnaryOperationNode, UnaryOperator,
};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxNodePtr, SyntaxToken};

/// Builds [`Expression`]s from expression nodes of the parse tree.
///
/// Every produced node records the parse-tree node it came from.
/// Parenthesised expressions are transparent. Shapes the semantic layer
/// does not model (or malformed ones) produce `None`.
pub struct ExpressionTreeBuilder;

impl ExpressionTreeBuilder {
    /// Lower one expression node.
    pub fn build(node: &SyntaxNode) -> Option<Expression> {
        let expression = match node.kind() {
            SyntaxKind::LITERAL => Expression::Terminal(Self::literal(node)?),
            SyntaxKind::NAME_REF => {
                let ident = first_token(node, SyntaxKind::IDENT)?;
                Expression::Terminal(TerminalSymbolNode::identifier(ident.text()))
            }
            SyntaxKind::PAREN_EXPR => return Self::build(&node.children().next()?),
            SyntaxKind::BIN_EXPR => Self::binary(node)?,
            SyntaxKind::PREFIX_EXPR => Self::prefix(node)?,
            SyntaxKind::CALL_EXPR => Self::method_call(node)?,
            SyntaxKind::NEW_EXPR => Self::constructor_call(node)?,
            kind => {
                trace!(?kind, "no expression model for node");
                return None;
            }
        };

        Some(expression.with_representing_ast(SyntaxNodePtr::new(node)))
    }

    fn literal(node: &SyntaxNode) -> Option<TerminalSymbolNode> {
        let token = significant_tokens(node).next()?;
        let kind = match token.kind() {
            SyntaxKind::STRING => LiteralKind::String,
            SyntaxKind::NUMBER => LiteralKind::Number,
            SyntaxKind::DATE => LiteralKind::Date,
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => LiteralKind::Boolean,
            SyntaxKind::NULL_KW => LiteralKind::Null,
            SyntaxKind::UNDEFINED_KW => LiteralKind::Undefined,
            _ => return None,
        };
        Some(TerminalSymbolNode::literal(kind, token.text()))
    }

    fn binary(node: &SyntaxNode) -> Option<Expression> {
        let mut operands = node.children();
        let left = Self::build(&operands.next()?)?;
        let right = Self::build(&operands.next()?)?;

        let operator = significant_tokens(node).find_map(|token| binary_operator(token.kind()))?;
        Some(Expression::BinaryOp(BinaryOperationNode::new(operator, left, right)))
    }

    fn prefix(node: &SyntaxNode) -> Option<Expression> {
        let operator = match significant_tokens(node).next()?.kind() {
            SyntaxKind::PLUS => UnaryOperator::Plus,
            SyntaxKind::MINUS => UnaryOperator::Neg,
            SyntaxKind::NOT_KW => UnaryOperator::Not,
            _ => return None,
        };
        let operand = Self::build(&node.children().next()?)?;
        Some(Expression::UnaryOp(UnaryOperationNode::new(operator, operand)))
    }

    fn method_call(node: &SyntaxNode) -> Option<Expression> {
        let name = first_token(node, SyntaxKind::IDENT)?;
        let mut call = MethodCallNode::new(name.text());
        if let Some(args) = child_node(node, SyntaxKind::ARG_LIST) {
            for argument in Self::arguments(&args)? {
                call.add_argument(argument);
            }
        }
        Some(Expression::MethodCall(call))
    }

    /// `New T(args)` is static; `New(typeExpr, args...)` is dynamic.
    fn constructor_call(node: &SyntaxNode) -> Option<Expression> {
        let mut arguments = match child_node(node, SyntaxKind::ARG_LIST) {
            Some(args) => Self::arguments(&args)?,
            None => Vec::new(),
        }
        .into_iter();

        let mut call = match child_node(node, SyntaxKind::TYPE_NAME) {
            Some(type_name) => {
                let ident = first_token(&type_name, SyntaxKind::IDENT)?;
                let literal = TerminalSymbolNode::literal(LiteralKind::TypeName, ident.text())
                    .with_representing_ast(SyntaxNodePtr::new(&type_name));
                ConstructorCallNode::create_static(literal)
            }
            None => match arguments.next()? {
                Expression::SkippedCallArg => return None,
                type_name => ConstructorCallNode::create_dynamic(type_name),
            },
        };

        for argument in arguments {
            call.add_argument(argument);
        }
        Some(Expression::ConstructorCall(call))
    }

    /// Lower an argument list, turning empty slots into skipped arguments.
    fn arguments(list: &SyntaxNode) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();
        let mut slot_filled = false;
        let mut saw_comma = false;

        for element in list.children_with_tokens() {
            match element.kind() {
                SyntaxKind::COMMA => {
                    if !slot_filled {
                        arguments.push(Expression::SkippedCallArg);
                    }
                    slot_filled = false;
                    saw_comma = true;
                }
                _ => {
                    if let Some(node) = element.into_node() {
                        arguments.push(Self::build(&node)?);
                        slot_filled = true;
                    }
                }
            }
        }

        if saw_comma && !slot_filled {
            arguments.push(Expression::SkippedCallArg);
        }
        Some(arguments)
    }
}

fn binary_operator(kind: SyntaxKind) -> Option<BinaryOperator> {
    let operator = match kind {
        SyntaxKind::PLUS => BinaryOperator::Add,
        SyntaxKind::MINUS => BinaryOperator::Sub,
        SyntaxKind::STAR => BinaryOperator::Mul,
        SyntaxKind::SLASH => BinaryOperator::Div,
        SyntaxKind::PERCENT => BinaryOperator::Mod,
        SyntaxKind::EQ => BinaryOperator::Eq,
        SyntaxKind::NEQ => BinaryOperator::NotEq,
        SyntaxKind::LT => BinaryOperator::Lt,
        SyntaxKind::LT_EQ => BinaryOperator::LtEq,
        SyntaxKind::GT => BinaryOperator::Gt,
        SyntaxKind::GT_EQ => BinaryOperator::GtEq,
        SyntaxKind::AND_KW => BinaryOperator::And,
        SyntaxKind::OR_KW => BinaryOperator::Or,
        _ => return None,
    };
    Some(operator)
}

/// Direct non-trivia tokens of a node.
fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    significant_tokens(node).find(|token| token.kind() == kind)
}

fn child_node(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}
