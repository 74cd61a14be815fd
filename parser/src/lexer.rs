//! Primary lexer for the structured text dialect. The lexer transforms
//! text into tokens (tokens are the input to the parser).
//!
//! Whitespace and comments are consumed here so that the grammar only
//! sees meaningful tokens.
use ferrost_dsl::{
    core::{FileId, SourceSpan},
    diagnostic::{Diagnostic, Label, QualifiedPosition},
};
use ferrost_problems::Problem;
use logos::Logos;

use crate::token::{LexicalError, Token, TokenType};

/// Tokenize a structured text program.
///
/// Lexing stops at the first invalid text. The returned stream always
/// ends with an `Eof` token that carries the final line number so that
/// errors at the end of the input still report a position.
pub fn tokenize(source: &str, file_id: &FileId) -> Result<Vec<Token>, Diagnostic> {
    let mut tokens = Vec::new();
    let mut lexer = TokenType::lexer(source);

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        let col = lexer.span().start - lexer.extras.line_start;
        match token {
            Ok(token_type) => {
                tokens.push(Token {
                    token_type,
                    span: SourceSpan {
                        start: lexer.span().start,
                        end: lexer.span().end,
                        file_id: file_id.clone(),
                    },
                    line,
                    col,
                    text: lexer.slice().into(),
                });
            }
            Err(error) => {
                let (problem, message) = match error {
                    LexicalError::UnexpectedCharacter => (
                        Problem::UnexpectedCharacter,
                        format!("The text '{}' is not valid at this location", lexer.slice()),
                    ),
                    LexicalError::OpenComment => (
                        Problem::OpenComment,
                        String::from("The block comment is missing the closing '*)'"),
                    ),
                    LexicalError::MalformedDuration => (
                        Problem::MalformedDuration,
                        format!(
                            "The duration '{}' is not digits followed by a time unit",
                            lexer.slice()
                        ),
                    ),
                };
                return Err(Diagnostic::problem(
                    problem,
                    Label::qualified(
                        file_id.clone(),
                        QualifiedPosition::new(line + 1, col + 1, lexer.span().start),
                        message,
                    ),
                ));
            }
        }
    }

    tokens.push(Token {
        token_type: TokenType::Eof,
        span: SourceSpan {
            start: source.len(),
            end: source.len(),
            file_id: file_id.clone(),
        },
        line: lexer.extras.line,
        col: source.len() - lexer.extras.line_start,
        text: String::new(),
    });

    Ok(tokens)
}
