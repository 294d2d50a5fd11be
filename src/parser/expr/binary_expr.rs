//! 二項演算式の解析
//!
//! 優先順位上昇法で二項演算・代入・キャストを解析する。

use log::trace;

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

/// 二項演算子に対応するトークンか
fn binary_op(token: &Token) -> Option<BinaryOp> {
    let op = match token {
        Token::Star => BinaryOp::Multiply,
        Token::Slash => BinaryOp::Divide,
        Token::Percent => BinaryOp::Modulo,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Subtract,
        Token::LtLt => BinaryOp::ShiftLeft,
        Token::GtGt => BinaryOp::ShiftRight,
        Token::Ampersand => BinaryOp::BitAnd,
        Token::Caret => BinaryOp::BitXor,
        Token::Pipe => BinaryOp::BitOr,
        Token::EqEq => BinaryOp::Equal,
        Token::NotEq => BinaryOp::NotEqual,
        Token::Lt => BinaryOp::Less,
        Token::Gt => BinaryOp::Greater,
        Token::LtEq => BinaryOp::LessEqual,
        Token::GtEq => BinaryOp::GreaterEqual,
        _ => return None,
    };
    Some(op)
}

/// 代入演算子に対応するトークンか
fn assign_op(token: &Token) -> Option<AssignOp> {
    let op = match token {
        Token::Assign => AssignOp::Assign,
        Token::PlusAssign => AssignOp::AddAssign,
        Token::MinusAssign => AssignOp::SubtractAssign,
        Token::StarAssign => AssignOp::MultiplyAssign,
        Token::SlashAssign => AssignOp::DivideAssign,
        Token::PercentAssign => AssignOp::ModuloAssign,
        Token::LtLtAssign => AssignOp::ShiftLeftAssign,
        Token::GtGtAssign => AssignOp::ShiftRightAssign,
        Token::AmpersandAssign => AssignOp::BitAndAssign,
        Token::CaretAssign => AssignOp::BitXorAssign,
        Token::PipeAssign => AssignOp::BitOrAssign,
        _ => return None,
    };
    Some(op)
}

impl<'a> Parser<'a> {
    /// `min`以上の優先順位を持つ演算子だけを取り込んで式を解析
    ///
    /// 演算子はすべて左結合なので、右辺は1つ上の優先順位で解析する。
    /// 代入も左結合で、`a = b = c`は`(a = b) = c`になる。
    /// 左へ畳み込むたびに深さを1つ数える。
    pub(crate) fn parse_expr_bp(&mut self, min: Precedence) -> ParseResult<Expression> {
        self.nested(|p| {
            let mut left = p.parse_unary_expression()?;

            loop {
                let token = p.current_token();
                let assign = assign_op(token);
                let binary = binary_op(token);
                let is_cast = matches!(token, Token::As);

                if let Some(op) = assign {
                    if Precedence::Assign < min {
                        break;
                    }
                    p.fold()?;
                    p.advance();
                    let value = p.parse_expr_bp(Precedence::Assign.next())?;
                    let span = left.span().to(value.span());
                    left = Expression::Assign(AssignExpr {
                        op,
                        target: Box::new(left),
                        value: Box::new(value),
                        span,
                    });
                } else if is_cast {
                    if Precedence::Cast < min {
                        break;
                    }
                    p.fold()?;
                    p.advance();
                    let ty = p.parse_type()?;
                    let span = left.span().to(ty.span());
                    left = Expression::Cast(CastExpr {
                        expr: Box::new(left),
                        ty,
                        span,
                    });
                } else if let Some(op) = binary {
                    let precedence = op.precedence();
                    if precedence < min {
                        break;
                    }
                    p.fold()?;
                    p.advance();
                    trace!("binary {} at precedence {:?}", op, precedence);
                    let right = p.parse_expr_bp(precedence.next())?;
                    let span = left.span().to(right.span());
                    left = Expression::Binary(BinaryExpr {
                        left: Box::new(left),
                        op,
                        right: Box::new(right),
                        span,
                    });
                } else {
                    break;
                }
            }

            Ok(left)
        })
    }
}
