//! 型

use serde::{Deserialize, Serialize};

use super::{IntegerLit, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Named(NamedType),
    Struct(StructType),
    Enum(EnumType),
    Array(ArrayType),
    Slice(SliceType),
    Pointer(PointerType),
    Function(FunctionType),
}

impl Type {
    pub fn span(&self) -> Span {
        match self {
            Type::Named(ty) => ty.span,
            Type::Struct(ty) => ty.span,
            Type::Enum(ty) => ty.span,
            Type::Array(ty) => ty.span,
            Type::Slice(ty) => ty.span,
            Type::Pointer(ty) => ty.span,
            Type::Function(ty) => ty.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    pub fields: Vec<StructField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// 列挙型（`enum u8 { A, B = 2 }`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub backing: Option<Box<Type>>,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<IntegerLit>,
    pub span: Span,
}

/// 固定長配列（`[N]T`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub size: ArraySize,
    pub element: Box<Type>,
    pub span: Span,
}

/// 配列の長さ（整数リテラルか定数名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArraySize {
    Integer(IntegerLit),
    Named { name: String, span: Span },
}

/// スライス（`[]T`、`[]const T`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceType {
    pub is_const: bool,
    pub element: Box<Type>,
    pub span: Span,
}

/// ポインタ（`*T`、`*const T`、`[*]T`）
///
/// `is_many`は長さ不明の配列を指すポインタ（`[*]T`）を表す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerType {
    pub is_const: bool,
    pub is_many: bool,
    pub pointee: Box<Type>,
    pub span: Span,
}

/// 関数型（`fn(T, U) R`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub is_variadic: bool,
    pub return_type: Option<Box<Type>>,
    pub span: Span,
}
