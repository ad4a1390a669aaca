//! Expression tree: a semantic shape for expressions, calls in particular.
//!
//! The tree is built from the parse tree by [`ExpressionTreeBuilder`] and
//! answers questions such as "is the type constructed by this `New` known
//! at analysis time, and if so which one".
//!
//! Nodes may point back at the parse-tree node they came from. The link is
//! a [`SyntaxNodePtr`]: positions only, it does not keep the tree alive and
//! plays no part in any semantic decision.

mod builder;

use std::borrow::Cow;

use smol_str::SmolStr;

use crate::syntax::SyntaxNodePtr;

pub use builder::ExpressionTreeBuilder;

// ============================================================================
// NODE TYPES
// ============================================================================

/// Tag identifying what an expression node represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Literal,
    Identifier,
    BinaryOp,
    UnaryOp,
    Call,
    ConstructorCall,
    /// An omitted argument, as in `Method(1, , 3)`
    SkippedCallArg,
}

/// Value category of a literal terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Number,
    Date,
    Boolean,
    Null,
    Undefined,
    /// A type name written directly after `New`
    TypeName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Neg,
    Not,
}

// ============================================================================
// EXPRESSION
// ============================================================================

/// An expression node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Terminal(TerminalSymbolNode),
    BinaryOp(BinaryOperationNode),
    UnaryOp(UnaryOperationNode),
    MethodCall(MethodCallNode),
    ConstructorCall(ConstructorCallNode),
    SkippedCallArg,
}

impl Expression {
    pub fn node_type(&self) -> NodeType {
        match self {
            Expression::Terminal(node) => node.node_type(),
            Expression::BinaryOp(_) => NodeType::BinaryOp,
            Expression::UnaryOp(_) => NodeType::UnaryOp,
            Expression::MethodCall(_) => NodeType::Call,
            Expression::ConstructorCall(_) => NodeType::ConstructorCall,
            Expression::SkippedCallArg => NodeType::SkippedCallArg,
        }
    }

    /// The parse-tree node this expression was built from, if recorded.
    pub fn representing_ast(&self) -> Option<&SyntaxNodePtr> {
        match self {
            Expression::Terminal(node) => node.representing_ast.as_ref(),
            Expression::BinaryOp(node) => node.representing_ast.as_ref(),
            Expression::UnaryOp(node) => node.representing_ast.as_ref(),
            Expression::MethodCall(node) => node.representing_ast.as_ref(),
            Expression::ConstructorCall(node) => node.representing_ast.as_ref(),
            Expression::SkippedCallArg => None,
        }
    }

    /// Record the originating parse-tree node. A skipped argument has none.
    pub fn set_representing_ast(&mut self, ptr: SyntaxNodePtr) {
        let slot = match self {
            Expression::Terminal(node) => &mut node.representing_ast,
            Expression::BinaryOp(node) => &mut node.representing_ast,
            Expression::UnaryOp(node) => &mut node.representing_ast,
            Expression::MethodCall(node) => &mut node.representing_ast,
            Expression::ConstructorCall(node) => &mut node.representing_ast,
            Expression::SkippedCallArg => return,
        };
        *slot = Some(ptr);
    }

    /// Builder-style [`set_representing_ast`](Self::set_representing_ast).
    pub fn with_representing_ast(mut self, ptr: SyntaxNodePtr) -> Self {
        self.set_representing_ast(ptr);
        self
    }

    /// View this node as a call, if it is one.
    pub fn as_call(&self) -> Option<&dyn CallNode> {
        match self {
            Expression::MethodCall(node) => Some(node as &dyn CallNode),
            Expression::ConstructorCall(node) => Some(node as &dyn CallNode),
            _ => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&TerminalSymbolNode> {
        match self {
            Expression::Terminal(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_constructor_call(&self) -> Option<&ConstructorCallNode> {
        match self {
            Expression::ConstructorCall(node) => Some(node),
            _ => None,
        }
    }

    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Terminal(_) | Expression::SkippedCallArg => Vec::new(),
            Expression::BinaryOp(node) => vec![node.left(), node.right()],
            Expression::UnaryOp(node) => vec![node.operand()],
            Expression::MethodCall(node) => node.arguments.iter().collect(),
            Expression::ConstructorCall(node) => std::iter::once(node.type_name())
                .chain(node.arguments.iter())
                .collect(),
        }
    }
}

impl From<TerminalSymbolNode> for Expression {
    fn from(node: TerminalSymbolNode) -> Self {
        Expression::Terminal(node)
    }
}

impl From<ConstructorCallNode> for Expression {
    fn from(node: ConstructorCallNode) -> Self {
        Expression::ConstructorCall(node)
    }
}

impl From<MethodCallNode> for Expression {
    fn from(node: MethodCallNode) -> Self {
        Expression::MethodCall(node)
    }
}

// ============================================================================
// TERMINALS AND OPERATORS
// ============================================================================

/// A leaf: a literal value or an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalSymbolNode {
    node_type: NodeType,
    literal_kind: Option<LiteralKind>,
    text: SmolStr,
    representing_ast: Option<SyntaxNodePtr>,
}

impl TerminalSymbolNode {
    pub fn literal(kind: LiteralKind, text: impl Into<SmolStr>) -> Self {
        Self {
            node_type: NodeType::Literal,
            literal_kind: Some(kind),
            text: text.into(),
            representing_ast: None,
        }
    }

    pub fn identifier(name: impl Into<SmolStr>) -> Self {
        Self {
            node_type: NodeType::Identifier,
            literal_kind: None,
            text: name.into(),
            representing_ast: None,
        }
    }

    pub fn with_representing_ast(mut self, ptr: SyntaxNodePtr) -> Self {
        self.representing_ast = Some(ptr);
        self
    }

    /// Either [`NodeType::Literal`] or [`NodeType::Identifier`].
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn literal_kind(&self) -> Option<LiteralKind> {
        self.literal_kind
    }

    /// Source text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn representing_ast(&self) -> Option<&SyntaxNodePtr> {
        self.representing_ast.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOperationNode {
    operator: BinaryOperator,
    left: Box<Expression>,
    right: Box<Expression>,
    representing_ast: Option<SyntaxNodePtr>,
}

impl BinaryOperationNode {
    pub fn new(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            representing_ast: None,
        }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryOperationNode {
    operator: UnaryOperator,
    operand: Box<Expression>,
    representing_ast: Option<SyntaxNodePtr>,
}

impl UnaryOperationNode {
    pub fn new(operator: UnaryOperator, operand: Expression) -> Self {
        Self {
            operator,
            operand: Box::new(operand),
            representing_ast: None,
        }
    }

    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }

    pub fn operand(&self) -> &Expression {
        &self.operand
    }
}

// ============================================================================
// CALLS
// ============================================================================

/// Behaviour shared by every call form: an ordered argument list.
pub trait CallNode {
    fn arguments(&self) -> &[Expression];

    fn add_argument(&mut self, argument: Expression);
}

/// A call of a method by name, `Method(args)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodCallNode {
    name: SmolStr,
    arguments: Vec<Expression>,
    representing_ast: Option<SyntaxNodePtr>,
}

impl MethodCallNode {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            representing_ast: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CallNode for MethodCallNode {
    fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    fn add_argument(&mut self, argument: Expression) {
        self.arguments.push(argument);
    }
}

/// A `New` expression.
///
/// Only the two factories create one, so whether the constructed type is
/// statically known is settled when the node is built and cannot change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorCallNode {
    type_name: Box<Expression>,
    arguments: Vec<Expression>,
    representing_ast: Option<SyntaxNodePtr>,
}

impl ConstructorCallNode {
    /// `New TypeName(args)`: the type name is written literally.
    ///
    /// # Panics
    /// Panics if `type_name` is not a literal terminal.
    pub fn create_static(type_name: TerminalSymbolNode) -> Self {
        assert_eq!(
            type_name.node_type(),
            NodeType::Literal,
            "static constructor call needs a literal type name, got `{}`",
            type_name.text()
        );
        Self::with_type_name(Expression::Terminal(type_name))
    }

    /// `New(typeNameExpression, args)`: the type name is computed.
    pub fn create_dynamic(type_name_expression: Expression) -> Self {
        Self::with_type_name(type_name_expression)
    }

    fn with_type_name(type_name: Expression) -> Self {
        Self {
            type_name: Box::new(type_name),
            arguments: Vec::new(),
            representing_ast: None,
        }
    }

    /// True iff the type name is a literal terminal.
    ///
    /// Only the type-name node's own tag is inspected: any computed type
    /// name counts as dynamic, even one a constant folder could evaluate.
    pub fn is_statically_typed(&self) -> bool {
        matches!(
            self.type_name.as_ref(),
            Expression::Terminal(terminal) if terminal.node_type() == NodeType::Literal
        )
    }

    pub fn type_name(&self) -> &Expression {
        &self.type_name
    }

    /// The constructed type's name when it is statically known.
    ///
    /// A string literal, as in `New("Structure")`, yields its value
    /// without quotes and with doubled quotes collapsed.
    pub fn static_type_name(&self) -> Option<Cow<'_, str>> {
        if !self.is_statically_typed() {
            return None;
        }
        let terminal = self.type_name.as_terminal()?;
        match terminal.literal_kind() {
            Some(LiteralKind::String) => Some(unquote(terminal.text())),
            _ => Some(Cow::Borrowed(terminal.text())),
        }
    }
}

/// Value of a BSL string literal token: `"a ""b"""` is `a "b"`.
fn unquote(text: &str) -> Cow<'_, str> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text);
    if inner.contains("\"\"") {
        Cow::Owned(inner.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(inner)
    }
}

impl CallNode for ConstructorCallNode {
    fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    fn add_argument(&mut self, argument: Expression) {
        self.arguments.push(argument);
    }
}
