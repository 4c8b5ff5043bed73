//! A small Java tokenizer for tests and benchmarks.
//!
//! Produces the same token records the external lexer does: `true`,
//! `false` and `null` come out as keywords, `->` as the `-` `>` pair, and
//! `>>`/`>>>` as single operator tokens. It does not report lexical errors;
//! anything unrecognised becomes a one-character operator.

use super::{Token, TokenKind};

const KEYWORDS: &[&str] = &[
    "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "continue",
    "default", "do", "double", "else", "enum", "extends", "false", "final", "finally", "float",
    "for", "if", "implements", "import", "instanceof", "int", "interface", "long", "native",
    "new", "null", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true",
    "try", "void", "volatile", "while",
];

const SEPARATORS: &str = "(){}[];,.";

/// Longest first, so maximal munch falls out of a linear scan.
const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "::", "++", "--", "&&", "||", "==", "!=", "<=", ">=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "=", "<", ">", "!", "~", "?",
    ":", "+", "-", "*", "/", "%", "&", "|", "^", "@",
];

/// Tokenize Java source text.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        rest: source,
        line: 1,
        column: 1,
        tokens: Vec::new(),
    };
    lexer.run();
    lexer.tokens
}

struct Lexer<'src> {
    rest: &'src str,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    fn run(&mut self) {
        while let Some(c) = self.rest.chars().next() {
            if c.is_whitespace() {
                self.bump(c.len_utf8());
            } else if self.rest.starts_with("//") {
                let end = self.rest.find('\n').unwrap_or(self.rest.len());
                self.bump(end);
            } else if self.rest.starts_with("/*") {
                let end = self.rest[2..].find("*/").map_or(self.rest.len(), |i| i + 4);
                self.bump(end);
            } else if c.is_ascii_digit() || (c == '.' && self.second().is_some_and(|d| d.is_ascii_digit())) {
                self.number();
            } else if c.is_alphabetic() || c == '_' || c == '$' {
                self.word();
            } else if c == '"' || c == '\'' {
                self.quoted(c);
            } else if c == '-' && self.second() == Some('>') {
                self.emit(TokenKind::Operator, 1);
                self.emit(TokenKind::Operator, 1);
            } else if SEPARATORS.contains(c) && !self.rest.starts_with("...") {
                self.emit(TokenKind::Separator, 1);
            } else {
                let len = OPERATORS
                    .iter()
                    .find(|op| self.rest.starts_with(*op))
                    .map_or(c.len_utf8(), |op| op.len());
                self.emit(TokenKind::Operator, len);
            }
        }
    }

    fn second(&self) -> Option<char> {
        self.rest.chars().nth(1)
    }

    fn number(&mut self) {
        let bytes = self.rest.as_bytes();
        let mut len = 0;
        let mut is_float = false;

        if self.rest.starts_with("0x") || self.rest.starts_with("0X") || self.rest.starts_with("0b") || self.rest.starts_with("0B") {
            len = 2;
            while len < bytes.len() && (bytes[len].is_ascii_hexdigit() || bytes[len] == b'_') {
                len += 1;
            }
        } else {
            while len < bytes.len() {
                let b = bytes[len];
                if b.is_ascii_digit() || b == b'_' {
                    len += 1;
                } else if b == b'.' && !is_float && bytes.get(len + 1).is_some_and(|d| d.is_ascii_digit()) {
                    is_float = true;
                    len += 1;
                } else if (b == b'e' || b == b'E') && len > 0 {
                    is_float = true;
                    len += 1;
                    if matches!(bytes.get(len), Some(b'+' | b'-')) {
                        len += 1;
                    }
                } else {
                    break;
                }
            }
        }

        match bytes.get(len) {
            Some(b'f' | b'F' | b'd' | b'D') => {
                is_float = true;
                len += 1;
            }
            Some(b'l' | b'L') => len += 1,
            _ => {}
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.emit(kind, len);
    }

    fn word(&mut self) {
        let len = self
            .rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$'))
            .map_or(self.rest.len(), |(i, _)| i);
        let kind = if KEYWORDS.contains(&&self.rest[..len]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.emit(kind, len);
    }

    fn quoted(&mut self, quote: char) {
        let mut escaped = false;
        let mut len = self.rest.len();
        for (i, c) in self.rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote || c == '\n' {
                len = i + c.len_utf8();
                break;
            }
        }
        let kind = if quote == '"' {
            TokenKind::StringLiteral
        } else {
            TokenKind::CharLiteral
        };
        self.emit(kind, len);
    }

    fn emit(&mut self, kind: TokenKind, len: usize) {
        let text = &self.rest[..len];
        self.tokens.push(Token::new(kind, text, self.line, self.column));
        self.bump(len);
    }

    fn bump(&mut self, len: usize) {
        for c in self.rest[..len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = &self.rest[len..];
    }
}
