//! 式

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Span, Type};
use crate::lexer::literal_parser;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    /// `@name`形式（方言依存）
    SpecialIdentifier(Identifier),
    String(StringLit),
    Character(CharLit),
    Integer(IntegerLit),
    Float(FloatLit),
    Parentheses(ParenthesesExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Assign(AssignExpr),
    Subscript(SubscriptExpr),
    Member(MemberExpr),
    Cast(CastExpr),
    InlineAssembly(InlineAssembly),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(e) | Expression::SpecialIdentifier(e) => e.span,
            Expression::String(e) => e.span,
            Expression::Character(e) => e.span,
            Expression::Integer(e) => e.span,
            Expression::Float(e) => e.span,
            Expression::Parentheses(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Assign(e) => e.span,
            Expression::Subscript(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Cast(e) => e.span,
            Expression::InlineAssembly(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// 文字列リテラル
///
/// `raw`は引用符の内側のテキストで、エスケープは解釈しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLit {
    pub raw: String,
    pub span: Span,
}

impl StringLit {
    /// エスケープを解釈した値
    pub fn value(&self) -> String {
        literal_parser::unescape(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharLit {
    pub raw: String,
    pub span: Span,
}

impl CharLit {
    pub fn value(&self) -> String {
        literal_parser::unescape(&self.raw)
    }
}

/// 整数リテラル（基数・サフィックスを含むテキストのまま保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerLit {
    pub text: String,
    pub span: Span,
}

impl IntegerLit {
    /// 値とサフィックス。不正な数字列なら`None`
    pub fn value(&self) -> Option<(u128, Option<&str>)> {
        literal_parser::parse_integer(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatLit {
    pub text: String,
    pub span: Span,
}

/// 括弧式（整形で括弧を保つために独立したノードにする）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesesExpr {
    pub inner: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-`
    Negate,
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `&`
    AddressOf,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::AddressOf => "&",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // 乗除
    Multiply,
    Divide,
    Modulo,

    // 加減
    Add,
    Subtract,

    // シフト
    ShiftLeft,
    ShiftRight,

    // ビット演算
    BitAnd,
    BitXor,
    BitOr,

    // 比較
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }

    /// 演算子の優先順位
    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Product,
            BinaryOp::Add | BinaryOp::Subtract => Precedence::Sum,
            BinaryOp::ShiftLeft | BinaryOp::ShiftRight => Precedence::Shift,
            BinaryOp::BitAnd => Precedence::BitAnd,
            BinaryOp::BitXor => Precedence::BitXor,
            BinaryOp::BitOr => Precedence::BitOr,
            BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::Less
            | BinaryOp::Greater
            | BinaryOp::LessEqual
            | BinaryOp::GreaterEqual => Precedence::Comparison,
        }
    }
}

/// 優先順位（低い順）
///
/// すべての二項演算子は左結合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precedence {
    Lowest,
    Assign,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Sum,
    Product,
    Cast,
    Prefix,
    Postfix,
}

impl Precedence {
    /// 1つ上の優先順位（左結合の右辺に使う）
    pub fn next(self) -> Precedence {
        match self {
            Precedence::Lowest => Precedence::Assign,
            Precedence::Assign => Precedence::Comparison,
            Precedence::Comparison => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Shift,
            Precedence::Shift => Precedence::Sum,
            Precedence::Sum => Precedence::Product,
            Precedence::Product => Precedence::Cast,
            Precedence::Cast => Precedence::Prefix,
            Precedence::Prefix | Precedence::Postfix => Precedence::Postfix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub args: Vec<Expression>,
    pub span: Span,
}

/// 代入式（`=`と複合代入）
///
/// 左辺が代入可能かどうかは意味解析で検査する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    BitAndAssign,
    BitXorAssign,
    BitOrAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::MultiplyAssign => "*=",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%=",
            AssignOp::ShiftLeftAssign => "<<=",
            AssignOp::ShiftRightAssign => ">>=",
            AssignOp::BitAndAssign => "&=",
            AssignOp::BitXorAssign => "^=",
            AssignOp::BitOrAssign => "|=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptExpr {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// メンバーアクセス
///
/// `p.*`はポインタの参照外しを表し、キーは`MemberKey::Wildcard`になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub target: Box<Expression>,
    pub key: MemberKey,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKey {
    Identifier(String),
    Wildcard,
}

impl MemberKey {
    pub fn is_deref(&self) -> bool {
        matches!(self, MemberKey::Wildcard)
    }
}

/// キャスト（`expr as T`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub expr: Box<Expression>,
    pub ty: Type,
    pub span: Span,
}

/// インラインアセンブリ
///
/// 各セクションは`:`の有無で`Some`/`None`が決まる。
/// `: :`のように空のセクションは`Some`で中身が空になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAssembly {
    pub templates: Vec<StringLit>,
    pub output: Option<AsmSection<AsmOutput>>,
    pub inputs: Option<AsmSection<AsmInput>>,
    pub clobbers: Option<AsmSection<StringLit>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsmSection<T> {
    pub operands: Vec<T>,
    pub span: Span,
}

impl<T> AsmSection<T> {
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

/// 出力オペランド（`"=r"(T)`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsmOutput {
    pub constraint: StringLit,
    pub ty: Type,
    pub span: Span,
}

/// 入力オペランド（`"r"(expr)`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsmInput {
    pub constraint: StringLit,
    pub value: Expression,
    pub span: Span,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
