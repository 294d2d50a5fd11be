//! トークン定義

use logos::{Lexer as LogosLexer, Logos};
use std::fmt;

use crate::dialect::DialectFeatures;
use crate::error::LexicalErrorKind;

/// Barq/Ceriumのトークン型
///
/// 空白とコメントもトークンとして生成し、`TriviaFilter`で取り除く。
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = DialectFeatures)]
#[logos(error = LexicalErrorKind)]
pub enum Token {
    // キーワード
    #[token("module")]
    Module,
    #[token("import")]
    Import,
    #[token("pub")]
    Pub,
    #[token("const")]
    Const,
    #[token("var")]
    Var,
    #[token("export")]
    Export,
    #[token("extern")]
    Extern,
    #[token("fn")]
    Fn,
    #[token("type")]
    Type,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("asm")]
    Asm,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("defer")]
    Defer,
    #[token("return")]
    Return,
    #[token("switch")]
    Switch,
    #[token("as")]
    As,

    // 識別子（キーワードより優先度が低い）
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*", identifier)]
    Identifier(String),

    // `@name`形式の特殊識別子（`@`は含まない）
    #[regex(r"@[_a-zA-Z][_a-zA-Z0-9]*", special_identifier)]
    SpecialIdentifier(String),

    // 数値リテラル（基数・サフィックスの解釈は後段で行う）
    #[regex(r"[0-9][_a-zA-Z0-9]*", |lex| lex.slice().to_owned())]
    Integer(String),

    #[regex(r"[0-9][0-9_]*\.[0-9_]*", |lex| lex.slice().to_owned())]
    Float(String),

    // 文字列リテラル（引用符の内側をそのまま保持する）
    #[regex(r#""([^"\\]|\\.)*""#, quoted_content)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string)]
    String(String),

    #[regex(r"'([^'\\]|\\.)*'", quoted_content)]
    #[regex(r"'([^'\\]|\\.)*", unterminated_character)]
    Character(String),

    // 代入演算子
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("<<=")]
    LtLtAssign,
    #[token(">>=")]
    GtGtAssign,
    #[token("&=")]
    AmpersandAssign,
    #[token("^=")]
    CaretAssign,
    #[token("|=")]
    PipeAssign,

    // 演算子
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("&")]
    Ampersand,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // デリミタ
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[*]")]
    ManyPointer,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token(":=")]
    ColonAssign,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,

    // トリビア
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\n]*", |lex| lex.slice()[2..].to_owned())]
    Comment(String),

    // 入力の終端
    Eof,

    // 字句エラー（レキサーは停止せず次のバイトから再開する）
    Error(LexicalErrorKind),
}

/// トークンの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Integer,
    Float,
    String,
    Character,
    Punctuation,
    Trivia,
    Error,
    EndOfInput,
}

fn identifier(lex: &mut LogosLexer<Token>) -> String {
    if lex.extras.namespaced_identifiers {
        let extra = lex
            .remainder()
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b':')
            .count();
        lex.bump(extra);
    }
    lex.slice().to_owned()
}

fn special_identifier(lex: &mut LogosLexer<Token>) -> Result<String, LexicalErrorKind> {
    if lex.extras.special_identifiers {
        Ok(lex.slice()[1..].to_owned())
    } else {
        Err(LexicalErrorKind::DisabledSpecialIdentifier)
    }
}

fn quoted_content(lex: &mut LogosLexer<Token>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_owned()
}

fn unterminated_string(_: &mut LogosLexer<Token>) -> Result<String, LexicalErrorKind> {
    Err(LexicalErrorKind::UnterminatedString)
}

fn unterminated_character(_: &mut LogosLexer<Token>) -> Result<String, LexicalErrorKind> {
    Err(LexicalErrorKind::UnterminatedCharacter)
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Module
            | Token::Import
            | Token::Pub
            | Token::Const
            | Token::Var
            | Token::Export
            | Token::Extern
            | Token::Fn
            | Token::Type
            | Token::Struct
            | Token::Enum
            | Token::Asm
            | Token::If
            | Token::Else
            | Token::While
            | Token::Break
            | Token::Continue
            | Token::Defer
            | Token::Return
            | Token::Switch
            | Token::As => TokenKind::Keyword,
            Token::Identifier(_) | Token::SpecialIdentifier(_) => TokenKind::Identifier,
            Token::Integer(_) => TokenKind::Integer,
            Token::Float(_) => TokenKind::Float,
            Token::String(_) => TokenKind::String,
            Token::Character(_) => TokenKind::Character,
            Token::Whitespace | Token::Comment(_) => TokenKind::Trivia,
            Token::Eof => TokenKind::EndOfInput,
            Token::Error(_) => TokenKind::Error,
            _ => TokenKind::Punctuation,
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.kind() == TokenKind::Trivia
    }

    /// エラーメッセージ用の表記
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier `{}`", name),
            Token::SpecialIdentifier(name) => format!("special identifier `@{}`", name),
            Token::Integer(text) => format!("integer literal `{}`", text),
            Token::Float(text) => format!("float literal `{}`", text),
            Token::String(_) => "string literal".to_string(),
            Token::Character(_) => "character literal".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::Whitespace => "whitespace".to_string(),
            Token::Eof => "end of input".to_string(),
            Token::Error(kind) => kind.to_string(),
            other => format!("`{}`", other),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Module => write!(f, "module"),
            Token::Import => write!(f, "import"),
            Token::Pub => write!(f, "pub"),
            Token::Const => write!(f, "const"),
            Token::Var => write!(f, "var"),
            Token::Export => write!(f, "export"),
            Token::Extern => write!(f, "extern"),
            Token::Fn => write!(f, "fn"),
            Token::Type => write!(f, "type"),
            Token::Struct => write!(f, "struct"),
            Token::Enum => write!(f, "enum"),
            Token::Asm => write!(f, "asm"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::Break => write!(f, "break"),
            Token::Continue => write!(f, "continue"),
            Token::Defer => write!(f, "defer"),
            Token::Return => write!(f, "return"),
            Token::Switch => write!(f, "switch"),
            Token::As => write!(f, "as"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::SpecialIdentifier(s) => write!(f, "@{}", s),
            Token::Integer(s) => write!(f, "{}", s),
            Token::Float(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Character(s) => write!(f, "'{}'", s),
            Token::Assign => write!(f, "="),
            Token::PlusAssign => write!(f, "+="),
            Token::MinusAssign => write!(f, "-="),
            Token::StarAssign => write!(f, "*="),
            Token::SlashAssign => write!(f, "/="),
            Token::PercentAssign => write!(f, "%="),
            Token::LtLtAssign => write!(f, "<<="),
            Token::GtGtAssign => write!(f, ">>="),
            Token::AmpersandAssign => write!(f, "&="),
            Token::CaretAssign => write!(f, "^="),
            Token::PipeAssign => write!(f, "|="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::LtLt => write!(f, "<<"),
            Token::GtGt => write!(f, ">>"),
            Token::Ampersand => write!(f, "&"),
            Token::Caret => write!(f, "^"),
            Token::Pipe => write!(f, "|"),
            Token::Tilde => write!(f, "~"),
            Token::Bang => write!(f, "!"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::ManyPointer => write!(f, "[*]"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::DoubleColon => write!(f, "::"),
            Token::ColonAssign => write!(f, ":="),
            Token::Dot => write!(f, "."),
            Token::Ellipsis => write!(f, "..."),
            Token::FatArrow => write!(f, "=>"),
            Token::Arrow => write!(f, "->"),
            Token::Whitespace => write!(f, " "),
            Token::Comment(s) => write!(f, "//{}", s),
            Token::Eof => write!(f, "<eof>"),
            Token::Error(_) => write!(f, "error"),
        }
    }
}
