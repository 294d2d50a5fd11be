//! 方言（dialect）の設定
//!
//! BarqとCeriumは共通の文法を持ち、表層構文の一部だけが異なる。
//! 方言ごとにパーサーを分けず、有効な機能をフラグで切り替える。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 入れ子の深さの既定上限
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// 言語の方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// 第1世代のBarq
    #[default]
    Barq,
    /// 第2世代のBarq
    Barq2,
    /// Cerium
    Cerium,
}

impl Dialect {
    pub fn features(self) -> DialectFeatures {
        match self {
            Dialect::Barq => DialectFeatures {
                namespaced_identifiers: true,
                ..DialectFeatures::default()
            },
            Dialect::Barq2 => DialectFeatures {
                namespaced_identifiers: true,
                special_identifiers: true,
                slices: true,
                function_types: true,
                ..DialectFeatures::default()
            },
            Dialect::Cerium => DialectFeatures {
                namespaced_identifiers: false,
                special_identifiers: true,
                slices: true,
                function_types: true,
                colon_annotations: true,
                constant_colons: true,
                inferred_variables: true,
                foreign_attributes: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Barq => "barq",
            Dialect::Barq2 => "barq2",
            Dialect::Cerium => "cerium",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "barq" => Ok(Dialect::Barq),
            "barq2" => Ok(Dialect::Barq2),
            "cerium" => Ok(Dialect::Cerium),
            other => Err(format!("unknown dialect: {}", other)),
        }
    }
}

/// 方言ごとに有効化される構文機能
///
/// レキサーの`extras`としても使われるため、コピー可能な小さな構造体にしている。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialectFeatures {
    /// 識別子中の`:`（`std:io`のような名前空間付きの名前）
    pub namespaced_identifiers: bool,
    /// `@name`形式の特殊識別子
    pub special_identifiers: bool,
    /// スライス型`[]T`
    pub slices: bool,
    /// 関数型`fn(T) R`
    pub function_types: bool,
    /// フィールド・引数・変数の`name: T`注釈
    pub colon_annotations: bool,
    /// `NAME :: expr;`による定数宣言
    pub constant_colons: bool,
    /// `name := expr;`による型推論付き変数宣言
    pub inferred_variables: bool,
    /// `extern`の代わりに使う`@foreign`属性
    pub foreign_attributes: bool,
}

/// パーサーの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    pub dialect: Dialect,
    pub features: DialectFeatures,
    /// 式・文・型の再帰の上限
    pub max_depth: usize,
}

impl ParserConfig {
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            features: dialect.features(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::for_dialect(Dialect::default())
    }
}
