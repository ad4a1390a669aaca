//! HIR layer tests
//!
//! - Reference resolution across documents
//! - Expression tree lowering
