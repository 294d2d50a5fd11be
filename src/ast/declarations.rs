//! トップレベル要素と宣言

use serde::{Deserialize, Serialize};

use super::{Block, Expression, Span, StringLit, Type};

/// モジュールのトップレベル要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    ModuleSpecifier(ModuleSpecifier),
    Import(Import),
    Constant(ConstantDecl),
    Variable(VariableDecl),
    ExternVariable(ExternVariableDecl),
    TypeAlias(TypeAlias),
    Function(FunctionDecl),
    ExternFunction(ExternFunctionDecl),
    GlobalAssembly(GlobalAssembly),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::ModuleSpecifier(item) => item.span,
            Item::Import(item) => item.span,
            Item::Constant(item) => item.span,
            Item::Variable(item) => item.span,
            Item::ExternVariable(item) => item.span,
            Item::TypeAlias(item) => item.span,
            Item::Function(item) => item.span,
            Item::ExternFunction(item) => item.span,
            Item::GlobalAssembly(item) => item.span,
        }
    }

    /// 宣言された名前（名前を持たない要素は`None`）
    pub fn name(&self) -> Option<&str> {
        match self {
            Item::ModuleSpecifier(item) => Some(&item.name),
            Item::Constant(item) => Some(&item.name),
            Item::Variable(item) => Some(&item.name),
            Item::ExternVariable(item) => Some(&item.name),
            Item::TypeAlias(item) => Some(&item.name),
            Item::Function(item) => Some(&item.name),
            Item::ExternFunction(item) => Some(&item.name),
            Item::Import(_) | Item::GlobalAssembly(_) => None,
        }
    }
}

/// `module name;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpecifier {
    pub name: String,
    pub span: Span,
}

/// `import "path";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub path: StringLit,
    pub span: Span,
}

/// 定数宣言（`const NAME = expr;`または`NAME :: expr;`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDecl {
    pub name: String,
    pub value: Expression,
    pub is_public: bool,
    pub span: Span,
}

/// 変数宣言（`var name T = expr;`または`name := expr;`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub ty: Option<Type>,
    pub init: Option<Expression>,
    pub is_exported: bool,
    pub is_public: bool,
    pub span: Span,
}

/// 外部変数宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternVariableDecl {
    pub name: String,
    pub ty: Type,
    pub is_public: bool,
    pub span: Span,
}

/// 型エイリアス（`type Name = T;`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub name: String,
    pub ty: Type,
    pub is_public: bool,
    pub span: Span,
}

/// 関数の引数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// 関数定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub is_variadic: bool,
    pub return_type: Option<Type>,
    pub body: Block,
    pub is_exported: bool,
    pub is_public: bool,
    pub span: Span,
}

/// 外部関数宣言（本体を持たない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternFunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub is_variadic: bool,
    pub return_type: Option<Type>,
    pub is_public: bool,
    pub span: Span,
}

/// グローバルアセンブリ（`asm { "..." }`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAssembly {
    pub templates: Vec<StringLit>,
    pub span: Span,
}
