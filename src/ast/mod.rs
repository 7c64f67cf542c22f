/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the expression tree
///
/// Submodules:
/// - ast: the Expr sum type, File and Comment
/// - expressions: the node structs behind each Expr variant
/// - insert: the precedence-driven insertion that grows a partial tree
/// - scope: names visible to the parser when resolving identifiers
pub mod ast;
pub mod expressions;
pub mod insert;
pub mod scope;
