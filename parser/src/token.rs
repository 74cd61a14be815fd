//! Provides definitions of tokens in the structured text dialect.
use ferrost_dsl::core::SourceSpan;
use logos::{FilterResult, Lexer, Logos, Skip};
use std::fmt;

/// Position information the lexer carries while scanning.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Position {
    /// The line number (0-indexed)
    pub line: usize,
    /// The offset of the first character of the current line
    pub line_start: usize,
}

/// The reason a piece of text is not a valid token.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum LexicalError {
    /// Text that matches no token rule.
    #[default]
    UnexpectedCharacter,
    /// A block comment that is still open at the end of the file.
    OpenComment,
    /// A duration literal with missing digits or a bad unit.
    MalformedDuration,
}

/// Update the line count and the offset of the line start.
fn newline_callback(lex: &mut Lexer<TokenType>) -> Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    Skip
}

/// Consume a block comment, counting the lines the comment spans. Comments
/// do not nest. A comment that is still open at the end of the file is a
/// lexical error.
fn block_comment_callback(lex: &mut Lexer<TokenType>) -> FilterResult<(), LexicalError> {
    match lex.remainder().find("*)") {
        Some(len) => {
            for (offset, byte) in lex.remainder()[..len].bytes().enumerate() {
                if byte == b'\n' {
                    lex.extras.line += 1;
                    lex.extras.line_start = lex.span().end + offset + 1;
                }
            }
            lex.bump(len + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(LexicalError::OpenComment),
    }
}

/// Check the segments of a duration literal. The text after the `T#` prefix
/// must be one or more `<digits><unit>` segments where the unit is one of
/// `d`, `h`, `m`, `s` or `ms` (any case).
fn duration_callback(lex: &mut Lexer<TokenType>) -> Result<(), LexicalError> {
    let mut rest = &lex.slice()[2..];
    if rest.is_empty() {
        return Err(LexicalError::MalformedDuration);
    }
    while !rest.is_empty() {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return Err(LexicalError::MalformedDuration);
        }
        rest = &rest[digits..];
        let letters = rest.chars().take_while(char::is_ascii_alphabetic).count();
        let unit = rest[..letters].to_ascii_lowercase();
        if !matches!(unit.as_str(), "d" | "h" | "m" | "s" | "ms") {
            return Err(LexicalError::MalformedDuration);
        }
        rest = &rest[letters..];
    }
    Ok(())
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = Position)]
#[logos(error = LexicalError)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenType {
    #[token("\n", newline_callback)]
    Newline,

    #[token("(*", block_comment_callback)]
    Comment,

    // Grouping and other markers
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("..")]
    DotDot,

    // Declarations and initialization
    #[token("VAR", ignore(case))]
    Var,
    #[token("END_VAR", ignore(case))]
    EndVar,
    #[token("VAR_INPUT", ignore(case))]
    VarInput,
    #[token("VAR_OUTPUT", ignore(case))]
    VarOutput,
    #[token("ARRAY", ignore(case))]
    Array,
    #[token("OF", ignore(case))]
    Of,

    // Program organization units
    #[token("FUNCTION", ignore(case))]
    Function,
    #[token("END_FUNCTION", ignore(case))]
    EndFunction,
    #[token("FUNCTION_BLOCK", ignore(case))]
    FunctionBlock,
    #[token("END_FUNCTION_BLOCK", ignore(case))]
    EndFunctionBlock,
    #[token("PROGRAM", ignore(case))]
    Program,
    #[token("END_PROGRAM", ignore(case))]
    EndProgram,
    #[token("RETURN", ignore(case))]
    Return,

    // Elementary types
    #[token("INTEGER", ignore(case))]
    Integer,
    #[token("REAL", ignore(case))]
    Real,
    #[token("BOOLEAN", ignore(case))]
    Boolean,
    #[token("TRUE", ignore(case))]
    True,
    #[token("FALSE", ignore(case))]
    False,

    // Expressions
    #[token("OR", ignore(case))]
    Or,
    #[token("AND", ignore(case))]
    And,
    #[token("NOT", ignore(case))]
    Not,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("/")]
    Div,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token(":=")]
    Assignment,

    // Selection statements
    #[token("IF", ignore(case))]
    If,
    #[token("THEN", ignore(case))]
    Then,
    #[token("ELSE", ignore(case))]
    Else,
    #[token("END_IF", ignore(case))]
    EndIf,

    // Iteration statements
    #[token("FOR", ignore(case))]
    For,
    #[token("TO", ignore(case))]
    To,
    #[token("END_FOR", ignore(case))]
    EndFor,
    #[token("WHILE", ignore(case))]
    While,
    #[token("DO", ignore(case))]
    Do,
    #[token("END_WHILE", ignore(case))]
    EndWhile,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[Tt]#[0-9A-Za-z_\.]*", duration_callback)]
    Duration,

    /// Sentinel appended after the last token so that errors at the end of
    /// the input still have a position. Never produced by the scanner.
    Eof,
}

/// A token in a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
    /// The line number (0-indexed)
    pub line: usize,
    /// The column number (0-indexed)
    pub col: usize,
    pub text: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}
