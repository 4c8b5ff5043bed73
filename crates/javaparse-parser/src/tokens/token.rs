//! Token records handed over by the external lexer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A token as produced by the lexer.
///
/// Owned so it can be deserialized or built by any tokenizer; the parser
/// copies the text into its arena when it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Token {
    #[cfg_attr(feature = "serde", serde(alias = "type"))]
    pub kind: TokenKind,
    #[cfg_attr(feature = "serde", serde(alias = "lexeme"))]
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum TokenKind {
    Keyword,
    Identifier,
    /// `( ) { } [ ] ; , .`
    Separator,
    Operator,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BooleanLiteral,
    NullLiteral,
    /// End of stream. Synthesized by the cursor when the lexer omits it.
    Eof,
}

impl TokenKind {
    /// The canonical lexer spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Operator => "OPERATOR",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::BooleanLiteral => "BOOLEAN_LITERAL",
            TokenKind::NullLiteral => "NULL_LITERAL",
            TokenKind::Eof => "EOF",
        }
    }

    /// Human readable name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Separator => "separator",
            TokenKind::Operator => "operator",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "floating-point literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "character literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::NullLiteral => "null literal",
            TokenKind::Eof => "end of input",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        )
    }

    /// Separators and operators are matched by text alone, since lexers
    /// disagree on which of the two some symbols belong to.
    pub fn is_punctuation(&self) -> bool {
        matches!(self, TokenKind::Separator | TokenKind::Operator)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token kind string the parser does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token kind '{0}'")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_uppercase().as_str() {
            "KEYWORD" => TokenKind::Keyword,
            "IDENTIFIER" => TokenKind::Identifier,
            "SEPARATOR" => TokenKind::Separator,
            "OPERATOR" => TokenKind::Operator,
            "INT_LITERAL" | "INTEGER_LITERAL" | "INTEGER" | "INT" => TokenKind::IntLiteral,
            "FLOAT_LITERAL" | "FLOAT" | "DOUBLE" => TokenKind::FloatLiteral,
            "STRING_LITERAL" | "STRING" => TokenKind::StringLiteral,
            "CHAR_LITERAL" | "CHAR" => TokenKind::CharLiteral,
            "BOOLEAN_LITERAL" | "BOOLEAN" | "BOOL" => TokenKind::BooleanLiteral,
            "NULL_LITERAL" | "NULL" => TokenKind::NullLiteral,
            "EOF" => TokenKind::Eof,
            _ => return Err(UnknownTokenKind(s.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for TokenKind {
    type Error = UnknownTokenKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenKind> for &'static str {
    fn from(kind: TokenKind) -> Self {
        kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_aliases() {
        assert_eq!("INTEGER".parse::<TokenKind>(), Ok(TokenKind::IntLiteral));
        assert_eq!("int_literal".parse::<TokenKind>(), Ok(TokenKind::IntLiteral));
        assert_eq!("DOUBLE".parse::<TokenKind>(), Ok(TokenKind::FloatLiteral));
        assert_eq!("BOOLEAN".parse::<TokenKind>(), Ok(TokenKind::BooleanLiteral));
        assert_eq!("SEPARATOR".parse::<TokenKind>(), Ok(TokenKind::Separator));
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = "COMMENT".parse::<TokenKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown token kind 'COMMENT'");
    }

    #[test]
    fn canonical_spelling_round_trips() {
        for kind in [
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Separator,
            TokenKind::Operator,
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
            TokenKind::StringLiteral,
            TokenKind::CharLiteral,
            TokenKind::BooleanLiteral,
            TokenKind::NullLiteral,
            TokenKind::Eof,
        ] {
            assert_eq!(kind.as_str().parse::<TokenKind>(), Ok(kind));
        }
    }

    #[test]
    fn punctuation_classification() {
        assert!(TokenKind::Separator.is_punctuation());
        assert!(TokenKind::Operator.is_punctuation());
        assert!(!TokenKind::Identifier.is_punctuation());
        assert!(TokenKind::NullLiteral.is_literal());
        assert!(!TokenKind::Keyword.is_literal());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_lexer_json() {
        let json = r#"[
            {"type": "KEYWORD", "lexeme": "class", "line": 1, "column": 1},
            {"kind": "IDENTIFIER", "text": "A", "line": 1, "column": 7}
        ]"#;
        let tokens: Vec<Token> = serde_json::from_str(json).unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Keyword, "class", 1, 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Identifier, "A", 1, 7));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_unknown_kind_in_json() {
        let json = r#"{"type": "WHITESPACE", "lexeme": " ", "line": 1, "column": 1}"#;
        assert!(serde_json::from_str::<Token>(json).is_err());
    }
}
