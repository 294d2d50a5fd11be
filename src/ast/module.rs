//! モジュール（ASTのルート）

use serde::{Deserialize, Serialize};

use super::{Item, Span};

/// ASTのルートノード（1つのソースファイル）
///
/// トップレベル要素はソース順に並ぶが、順序に意味はない。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub items: Vec<Item>,
    pub span: Span,
}

impl Module {
    /// `module name;`で指定されたモジュール名（最初のもの）
    pub fn name(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            Item::ModuleSpecifier(spec) => Some(spec.name.as_str()),
            _ => None,
        })
    }

    /// インポートされたパス（エスケープ未解釈）
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import.path.raw.as_str()),
            _ => None,
        })
    }
}
