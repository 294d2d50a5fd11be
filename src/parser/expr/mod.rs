//! 式の解析モジュール
//!
//! 式の解析を複数のサブモジュールに分割して管理する。
//! 各モジュールは特定の種類の式の解析を担当する。
//!
//! 優先順位（低い順）:
//! 代入 < 比較 < `|` < `^` < `&` < シフト < 加減 < 乗除 < `as` < 前置 < 後置

// サブモジュール
mod asm_expr;
mod binary_expr;
mod literal_expr;
mod postfix_expr;
mod unary_expr;
