//! Problem codes for the FerroST front end.
//!
//! Each diagnostic the compiler can produce is identified by a `Problem`
//! variant with a stable code. Codes remain stable between releases to
//! facilitate consistent documentation; variant names are internal and
//! may change. Codes beginning with P0 are lexical and syntactic, codes
//! beginning with P2 are semantic.

/// The set of problems that the front end can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// A character that no token can begin with, or a partial operator
    /// such as a lone `=` or `!`.
    UnexpectedCharacter,
    /// A block comment `(*` that is never closed.
    OpenComment,
    /// A duration literal `T#` without digits or without a unit.
    MalformedDuration,
    /// The token stream does not match the grammar.
    SyntaxError,
    /// The source has no content to parse.
    NoContent,
    /// A name declared twice in the same scope.
    DuplicateDeclaration,
    /// A reference to a name with no declaration in any enclosing scope.
    UndeclaredSymbol,
    /// An expression whose type is not accepted where it is used.
    TypeMismatch,
    /// An IF or WHILE condition that is not Boolean.
    ConditionTypeError,
    /// A wrong number of array subscripts or call arguments.
    ArityError,
    /// An array subscript that is not an Integer.
    IndexTypeError,
    /// An array dimension whose lower bound exceeds its upper bound.
    InvalidArrayBounds,
    /// An array initializer with more elements than the array holds.
    InvalidInitializer,
}

impl Problem {
    /// Returns the code for the particular problem as a string.
    pub fn code(&self) -> &str {
        match self {
            Problem::UnexpectedCharacter => "P0001",
            Problem::OpenComment => "P0002",
            Problem::MalformedDuration => "P0003",
            Problem::SyntaxError => "P0004",
            Problem::NoContent => "P0005",
            Problem::DuplicateDeclaration => "P2001",
            Problem::UndeclaredSymbol => "P2002",
            Problem::TypeMismatch => "P2003",
            Problem::ConditionTypeError => "P2004",
            Problem::ArityError => "P2005",
            Problem::IndexTypeError => "P2006",
            Problem::InvalidArrayBounds => "P2007",
            Problem::InvalidInitializer => "P2008",
        }
    }

    /// Returns the message for the particular problem as a string.
    /// The message is constant and does not depend on the particular
    /// instance of the problem.
    pub fn message(&self) -> &str {
        match self {
            Problem::UnexpectedCharacter => "Unexpected character",
            Problem::OpenComment => "Block comment is not closed before the end of the file",
            Problem::MalformedDuration => "Duration literal requires digits and a unit",
            Problem::SyntaxError => "Syntax error",
            Problem::NoContent => "File has no content",
            Problem::DuplicateDeclaration => "Name is already declared in this scope",
            Problem::UndeclaredSymbol => "Name is not declared in an enclosing scope",
            Problem::TypeMismatch => "Expression type is not valid here",
            Problem::ConditionTypeError => "Condition must be a Boolean expression",
            Problem::ArityError => "Wrong number of subscripts or arguments",
            Problem::IndexTypeError => "Array subscript must be an Integer expression",
            Problem::InvalidArrayBounds => "Array lower bound exceeds the upper bound",
            Problem::InvalidInitializer => "Initializer has more elements than the array",
        }
    }
}
