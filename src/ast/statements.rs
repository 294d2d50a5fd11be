//! 文

use serde::{Deserialize, Serialize};

use super::{ConstantDecl, Expression, Span, VariableDecl};

/// ブロック（`{ ... }`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    Break(Span),
    Continue(Span),
    Defer(DeferStatement),
    Return(ReturnStatement),
    Expression(Expression),
    Constant(ConstantDecl),
    Variable(VariableDecl),
    Switch(SwitchStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(block) => block.span,
            Statement::If(stmt) => stmt.span,
            Statement::While(stmt) => stmt.span,
            Statement::Break(span) | Statement::Continue(span) => *span,
            Statement::Defer(stmt) => stmt.span,
            Statement::Return(stmt) => stmt.span,
            Statement::Expression(expr) => expr.span(),
            Statement::Constant(decl) => decl.span,
            Statement::Variable(decl) => decl.span,
            Statement::Switch(stmt) => stmt.span,
        }
    }
}

/// if文
///
/// `else if`は`else_branch`に入れ子の`IfStatement`として右に連なる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    If(Box<IfStatement>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

/// defer文（1つの文またはブロックを包む）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferStatement {
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// switch文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub scrutinee: Expression,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

/// switchの1つのケース
///
/// 本体はブロックか単一の文。単一の文は自身の`;`まで含む。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub matcher: CaseMatcher,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaseMatcher {
    /// `else`（既定のケース）
    Else,
    /// 1つ以上の一致式
    Values(Vec<Expression>),
}
