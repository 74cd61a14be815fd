//! Primary parser for structured text language elements. The parser
//! transforms tokens into the DSL objects.
//!
//! The lexer removes whitespace and comments, so the grammar here only
//! handles meaningful tokens. Rules generally map 1:1 to the constructs
//! of the language; the `precedence!` ladder defines expression binding
//! from logical OR (loosest) down to primary expressions.
extern crate peg;

use ferrost_dsl::common::*;
use ferrost_dsl::core::{FileId, Id};
use ferrost_dsl::diagnostic::{Diagnostic, Label, QualifiedPosition};
use ferrost_dsl::textual::*;
use ferrost_problems::Problem;
use peg::parser;
use peg::Parse;
use peg::ParseElem;
use peg::RuleResult;

use crate::token::{Token, TokenType};

/// Parses a structured text library into object form.
pub fn parse_library(tokens: Vec<Token>, file_id: &FileId) -> Result<Library, Diagnostic> {
    let elements = st_parser::library(&SliceByRef(&tokens[..])).map_err(|e| {
        // The location in the error is the index of the offending token.
        match tokens.get(e.location).or_else(|| tokens.last()) {
            Some(token) => syntax_error(token, file_id),
            None => no_content(file_id),
        }
    })?;
    if elements.is_empty() {
        return Err(no_content(file_id));
    }
    Ok(Library { elements })
}

fn syntax_error(token: &Token, file_id: &FileId) -> Diagnostic {
    let message = match token.token_type {
        TokenType::Eof => String::from("The text ended before parsing completed"),
        _ => format!("The token {} is not valid at this location", token),
    };
    Diagnostic::problem(
        Problem::SyntaxError,
        Label::qualified(
            file_id.clone(),
            QualifiedPosition::new(token.line + 1, token.col + 1, token.span.start),
            message,
        ),
    )
}

fn no_content(file_id: &FileId) -> Diagnostic {
    Diagnostic::problem(
        Problem::NoContent,
        Label::file(file_id.clone(), "The text contains no declarations"),
    )
}

/// Declaration entry without the block's variable type (input, output,
/// etc.). Useful only as an intermediate step in the parser: the type is
/// not known until the entries of a block are mapped together.
enum UntypedDecl {
    Scalar {
        name: Id,
        type_name: TypeName,
        initializer: Option<ExprKind>,
    },
    Array {
        name: Id,
        element_type: TypeName,
        dims: Vec<Subrange>,
        initial_values: Option<Vec<ExprKind>>,
    },
}

impl UntypedDecl {
    fn into_stmt(self, var_type: VariableType) -> StmtKind {
        match self {
            UntypedDecl::Scalar {
                name,
                type_name,
                initializer,
            } => StmtKind::VarDecl(VarDecl {
                name,
                var_type,
                type_name,
                initializer,
            }),
            UntypedDecl::Array {
                name,
                element_type,
                dims,
                initial_values,
            } => StmtKind::ArrayDecl(ArrayDecl {
                name,
                var_type,
                element_type,
                dims,
                initial_values,
            }),
        }
    }
}

/// The `peg` crate expects the input type to expose elements that are
/// `Copy`, as in the `[u8]` or simple enum cases. This wrapper exposes the
/// elements by `&T` reference, which is `Copy`.
pub struct SliceByRef<'a, T>(pub &'a [T]);

impl<'a, T> Parse for SliceByRef<'a, T> {
    type PositionRepr = usize;
    fn start(&self) -> usize {
        0
    }

    fn is_eof(&self, pos: usize) -> bool {
        pos >= self.0.len()
    }

    fn position_repr(&self, pos: usize) -> usize {
        pos
    }
}

impl<'a, T: 'a> ParseElem<'a> for SliceByRef<'a, T> {
    type Element = &'a T;

    fn parse_elem(&'a self, pos: usize) -> RuleResult<&'a T> {
        match self.0[pos..].first() {
            Some(c) => RuleResult::Matched(pos + 1, c),
            None => RuleResult::Failed,
        }
    }
}

parser! {
  grammar st_parser<'a>() for SliceByRef<'a, Token> {

    /// Helper rule to match a particular type of token.
    rule tok(ty: TokenType) -> &'input Token = token:[t if t.token_type == ty] { token }

    pub rule library() -> Vec<LibraryElementKind> =
      decls:library_element_declaration()* tok(TokenType::Eof) { decls }

    rule library_element_declaration() -> LibraryElementKind =
      fd:function_declaration() { LibraryElementKind::FunctionDeclaration(fd) }
      / fbd:function_block_declaration() { LibraryElementKind::FunctionBlockDeclaration(fbd) }
      / pd:program_declaration() { LibraryElementKind::ProgramDeclaration(pd) }

    rule function_declaration() -> FunctionDeclaration =
      tok(TokenType::Function) name:identifier()
      return_type:(tok(TokenType::Colon) t:type_name() { t })?
      body:statement_list() tok(TokenType::EndFunction) {
        FunctionDeclaration { name, return_type, body }
      }

    rule function_block_declaration() -> FunctionBlockDeclaration =
      tok(TokenType::FunctionBlock) name:identifier()
      body:statement_list() tok(TokenType::EndFunctionBlock) {
        FunctionBlockDeclaration { name, body }
      }

    rule program_declaration() -> ProgramDeclaration =
      tok(TokenType::Program) name:identifier()
      body:statement_list() tok(TokenType::EndProgram) {
        ProgramDeclaration { name, body }
      }

    rule identifier() -> Id = token:tok(TokenType::Identifier) {
      Id::from(token.text.as_str()).with_span(token.span.clone())
    }

    rule type_name() -> TypeName =
      tok(TokenType::Integer) { TypeName::Integer }
      / tok(TokenType::Real) { TypeName::Real }
      / tok(TokenType::Boolean) { TypeName::Boolean }

    // Declaration blocks

    // A block flattens into one declaration statement per entry so that
    // declarations can appear in any statement position and scope with
    // the enclosing construct.
    rule var_block() -> Vec<StmtKind> =
      var_type:var_block_type() decls:var_decl()* tok(TokenType::EndVar) {
        decls.into_iter().map(|decl| decl.into_stmt(var_type)).collect()
      }

    rule var_block_type() -> VariableType =
      tok(TokenType::Var) { VariableType::Var }
      / tok(TokenType::VarInput) { VariableType::Input }
      / tok(TokenType::VarOutput) { VariableType::Output }

    rule var_decl() -> UntypedDecl = array_var_decl() / scalar_var_decl()

    rule scalar_var_decl() -> UntypedDecl =
      name:identifier() tok(TokenType::Colon) type_name:type_name()
      initializer:(tok(TokenType::Assignment) e:expression() { e })?
      tok(TokenType::Semicolon) {
        UntypedDecl::Scalar { name, type_name, initializer }
      }

    rule array_var_decl() -> UntypedDecl =
      name:identifier() tok(TokenType::Colon) tok(TokenType::Array)
      tok(TokenType::LeftBracket) dims:subrange() ++ (tok(TokenType::Comma))
      tok(TokenType::RightBracket) tok(TokenType::Of) element_type:type_name()
      initial_values:(tok(TokenType::Assignment) v:array_initializer() { v })?
      tok(TokenType::Semicolon) {
        UntypedDecl::Array { name, element_type, dims, initial_values }
      }

    rule array_initializer() -> Vec<ExprKind> =
      tok(TokenType::LeftBracket) values:expression() ** (tok(TokenType::Comma))
      tok(TokenType::RightBracket) { values }

    // Array bounds are signed integer literals.
    rule subrange() -> Subrange =
      lo:signed_integer() tok(TokenType::DotDot) hi:signed_integer() { Subrange::new(lo, hi) }

    rule signed_integer() -> i64 =
      tok(TokenType::Minus) token:tok(TokenType::Number)
        {? token.text.parse::<i64>().map(|value| -value).map_err(|_| "integer") }
      / token:tok(TokenType::Number)
        {? token.text.parse::<i64>().map_err(|_| "integer") }

    // Statements

    rule statement_list() -> Vec<StmtKind> =
      groups:statement_group()* { groups.into_iter().flatten().collect() }

    rule statement_group() -> Vec<StmtKind> =
      decls:var_block() { decls }
      / s:statement() { vec![s] }
      / tok(TokenType::Semicolon) { vec![] }

    rule statement() -> StmtKind =
      assignment_statement()
      / if_statement()
      / while_statement()
      / for_statement()
      / return_statement()

    rule assignment_statement() -> StmtKind =
      target:variable() tok(TokenType::Assignment) value:expression()
      tok(TokenType::Semicolon) {
        StmtKind::Assignment(Assignment { target, value })
      }

    rule if_statement() -> StmtKind =
      tok(TokenType::If) condition:expression() tok(TokenType::Then)
      body:statement_list()
      else_body:(tok(TokenType::Else) stmts:statement_list() { stmts })?
      tok(TokenType::EndIf) {
        StmtKind::If(If {
          condition,
          body,
          else_body: else_body.unwrap_or_default(),
        })
      }

    rule while_statement() -> StmtKind =
      tok(TokenType::While) condition:expression() tok(TokenType::Do)
      body:statement_list() tok(TokenType::EndWhile) {
        StmtKind::While(While { condition, body })
      }

    // The control must be a plain identifier by grammar, so an array
    // element or any other target fails to parse.
    rule for_statement() -> StmtKind =
      tok(TokenType::For) control:identifier() tok(TokenType::Assignment)
      from:expression() tok(TokenType::To) to:expression() tok(TokenType::Do)
      body:statement_list() tok(TokenType::EndFor) {
        StmtKind::For(For { control, from, to, body })
      }

    rule return_statement() -> StmtKind =
      tok(TokenType::Return) value:expression()? tok(TokenType::Semicolon) {
        StmtKind::Return(Return { value })
      }

    // Expressions

    pub rule expression() -> ExprKind = precedence!{
      x:(@) tok(TokenType::Or) y:@ { ExprKind::compare(CompareOp::Or, x, y) }
      --
      x:(@) tok(TokenType::And) y:@ { ExprKind::compare(CompareOp::And, x, y) }
      --
      x:(@) tok(TokenType::EqualEqual) y:@ { ExprKind::compare(CompareOp::Eq, x, y) }
      x:(@) tok(TokenType::NotEqual) y:@ { ExprKind::compare(CompareOp::Ne, x, y) }
      --
      x:(@) tok(TokenType::Less) y:@ { ExprKind::compare(CompareOp::Lt, x, y) }
      x:(@) tok(TokenType::Greater) y:@ { ExprKind::compare(CompareOp::Gt, x, y) }
      x:(@) tok(TokenType::LessEqual) y:@ { ExprKind::compare(CompareOp::LtEq, x, y) }
      x:(@) tok(TokenType::GreaterEqual) y:@ { ExprKind::compare(CompareOp::GtEq, x, y) }
      --
      x:(@) tok(TokenType::Plus) y:@ { ExprKind::binary(Operator::Add, x, y) }
      x:(@) tok(TokenType::Minus) y:@ { ExprKind::binary(Operator::Sub, x, y) }
      --
      x:(@) tok(TokenType::Star) y:@ { ExprKind::binary(Operator::Mul, x, y) }
      x:(@) tok(TokenType::Div) y:@ { ExprKind::binary(Operator::Div, x, y) }
      --
      e:unary_expression() { e }
    }

    rule unary_expression() -> ExprKind =
      op:unary_operator()? term:primary_expression() {
        match op {
          Some(op) => ExprKind::unary(op, term),
          None => term,
        }
      }

    rule unary_operator() -> UnaryOp =
      tok(TokenType::Minus) { UnaryOp::Neg }
      / tok(TokenType::Not) { UnaryOp::Not }

    rule primary_expression() -> ExprKind =
      c:constant() { ExprKind::Const(c) }
      / f:function_expression() { f }
      / v:variable() { ExprKind::Variable(v) }
      / tok(TokenType::LeftParen) e:expression() tok(TokenType::RightParen) { ExprKind::paren(e) }

    rule constant() -> ConstantKind =
      token:tok(TokenType::Number) {?
        if token.text.contains('.') {
          token.text.parse::<f64>().map(ConstantKind::Real).map_err(|_| "real literal")
        } else {
          token.text.parse::<i64>().map(ConstantKind::Integer).map_err(|_| "integer literal")
        }
      }
      / tok(TokenType::True) { ConstantKind::Boolean(true) }
      / tok(TokenType::False) { ConstantKind::Boolean(false) }

    rule function_expression() -> ExprKind =
      name:identifier() tok(TokenType::LeftParen)
      arguments:expression() ** (tok(TokenType::Comma))
      tok(TokenType::RightParen) {
        ExprKind::Function(Function { name, arguments })
      }

    rule variable() -> Variable =
      name:identifier() tok(TokenType::LeftBracket)
      subscripts:expression() ++ (tok(TokenType::Comma))
      tok(TokenType::RightBracket) {
        Variable::Array(ArrayVariable { variable: name, subscripts })
      }
      / name:identifier() { Variable::Named(NamedVariable { name }) }
  }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Result<Library, Diagnostic> {
        let file_id = FileId::default();
        let tokens = tokenize(source, &file_id)?;
        parse_library(tokens, &file_id)
    }

    fn program_body(source: &str) -> Vec<StmtKind> {
        let library = parse(source).unwrap();
        match library.elements.into_iter().next().unwrap() {
            LibraryElementKind::ProgramDeclaration(program) => program.body,
            element => panic!("expected a program, got {:?}", element),
        }
    }

    fn statement(fragment: &str) -> StmtKind {
        let source = format!("PROGRAM wrapper {} END_PROGRAM", fragment);
        let mut body = program_body(&source);
        assert_eq!(1, body.len(), "expected one statement from {}", fragment);
        body.remove(0)
    }

    fn expression(fragment: &str) -> ExprKind {
        match statement(&format!("x := {};", fragment)) {
            StmtKind::Assignment(assignment) => assignment.value,
            stmt => panic!("expected an assignment, got {:?}", stmt),
        }
    }

    #[test]
    fn expression_when_mixed_precedence_then_multiplication_binds_tighter() {
        assert_eq!(
            expression("2 + 3 * 4"),
            ExprKind::binary(
                Operator::Add,
                ExprKind::integer_literal(2),
                ExprKind::binary(
                    Operator::Mul,
                    ExprKind::integer_literal(3),
                    ExprKind::integer_literal(4)
                )
            )
        );
    }

    #[test]
    fn expression_when_same_precedence_then_left_associative() {
        assert_eq!(
            expression("10 - 3 - 2"),
            ExprKind::binary(
                Operator::Sub,
                ExprKind::binary(
                    Operator::Sub,
                    ExprKind::integer_literal(10),
                    ExprKind::integer_literal(3)
                ),
                ExprKind::integer_literal(2)
            )
        );
    }

    #[test]
    fn expression_when_parenthesized_then_wrapper_node_retained() {
        assert_eq!(
            expression("(2 + 3) * 4"),
            ExprKind::binary(
                Operator::Mul,
                ExprKind::paren(ExprKind::binary(
                    Operator::Add,
                    ExprKind::integer_literal(2),
                    ExprKind::integer_literal(3)
                )),
                ExprKind::integer_literal(4)
            )
        );
    }

    #[test]
    fn expression_when_relational_and_logical_then_relational_binds_tighter() {
        assert_eq!(
            expression("1 + 2 < 4 AND TRUE"),
            ExprKind::compare(
                CompareOp::And,
                ExprKind::compare(
                    CompareOp::Lt,
                    ExprKind::binary(
                        Operator::Add,
                        ExprKind::integer_literal(1),
                        ExprKind::integer_literal(2)
                    ),
                    ExprKind::integer_literal(4)
                ),
                ExprKind::boolean_literal(true)
            )
        );
    }

    #[test]
    fn expression_when_equality_then_looser_than_relational() {
        assert_eq!(
            expression("a < b == c > d"),
            ExprKind::compare(
                CompareOp::Eq,
                ExprKind::compare(
                    CompareOp::Lt,
                    ExprKind::named_variable("a"),
                    ExprKind::named_variable("b")
                ),
                ExprKind::compare(
                    CompareOp::Gt,
                    ExprKind::named_variable("c"),
                    ExprKind::named_variable("d")
                )
            )
        );
    }

    #[test]
    fn expression_when_unary_minus_then_unary_node() {
        assert_eq!(
            expression("-y"),
            ExprKind::unary(UnaryOp::Neg, ExprKind::named_variable("y"))
        );
    }

    #[test]
    fn expression_when_not_then_unary_node() {
        assert_eq!(
            expression("NOT flag"),
            ExprKind::unary(UnaryOp::Not, ExprKind::named_variable("flag"))
        );
    }

    #[test]
    fn expression_when_function_call_then_arguments_in_order() {
        assert_eq!(
            expression("max(a, b + 1)"),
            ExprKind::function(
                "max",
                vec![
                    ExprKind::named_variable("a"),
                    ExprKind::binary(
                        Operator::Add,
                        ExprKind::named_variable("b"),
                        ExprKind::integer_literal(1)
                    )
                ]
            )
        );
    }

    #[test]
    fn expression_when_call_without_arguments_then_empty_list() {
        assert_eq!(expression("next()"), ExprKind::function("next", vec![]));
    }

    #[test]
    fn expression_when_array_access_then_subscripts_in_order() {
        assert_eq!(
            expression("grid[i, j + 1]"),
            ExprKind::array_variable(
                "grid",
                vec![
                    ExprKind::named_variable("i"),
                    ExprKind::binary(
                        Operator::Add,
                        ExprKind::named_variable("j"),
                        ExprKind::integer_literal(1)
                    )
                ]
            )
        );
    }

    #[test]
    fn expression_when_real_literal_then_real_constant() {
        assert_eq!(expression("3.5"), ExprKind::real_literal(3.5));
    }

    #[test]
    fn expression_when_duration_then_syntax_error() {
        let result = parse("PROGRAM wrapper x := T#5s; END_PROGRAM");
        assert_eq!("P0004", result.unwrap_err().code);
    }

    #[test]
    fn statement_when_assignment_to_array_element_then_array_target() {
        assert_eq!(
            statement("grid[2] := 7;"),
            StmtKind::assignment(
                Variable::array("grid", vec![ExprKind::integer_literal(2)]),
                ExprKind::integer_literal(7)
            )
        );
    }

    #[test]
    fn statement_when_if_without_else_then_empty_else_body() {
        assert_eq!(
            statement("IF a THEN x := 1; END_IF"),
            StmtKind::if_then(
                ExprKind::named_variable("a"),
                vec![StmtKind::simple_assignment(
                    "x",
                    ExprKind::integer_literal(1)
                )]
            )
        );
    }

    #[test]
    fn statement_when_if_else_then_both_bodies() {
        assert_eq!(
            statement("IF a THEN x := 1; ELSE x := 2; END_IF"),
            StmtKind::if_then_else(
                ExprKind::named_variable("a"),
                vec![StmtKind::simple_assignment(
                    "x",
                    ExprKind::integer_literal(1)
                )],
                vec![StmtKind::simple_assignment(
                    "x",
                    ExprKind::integer_literal(2)
                )]
            )
        );
    }

    #[test]
    fn statement_when_while_then_condition_and_body() {
        assert_eq!(
            statement("WHILE x < 10 DO x := x + 1; END_WHILE"),
            StmtKind::while_loop(
                ExprKind::compare(
                    CompareOp::Lt,
                    ExprKind::named_variable("x"),
                    ExprKind::integer_literal(10)
                ),
                vec![StmtKind::simple_assignment(
                    "x",
                    ExprKind::binary(
                        Operator::Add,
                        ExprKind::named_variable("x"),
                        ExprKind::integer_literal(1)
                    )
                )]
            )
        );
    }

    #[test]
    fn statement_when_for_then_control_and_range() {
        assert_eq!(
            statement("FOR i := 0 TO 5 DO z := z + i; END_FOR"),
            StmtKind::for_loop(
                "i",
                ExprKind::integer_literal(0),
                ExprKind::integer_literal(5),
                vec![StmtKind::simple_assignment(
                    "z",
                    ExprKind::binary(
                        Operator::Add,
                        ExprKind::named_variable("z"),
                        ExprKind::named_variable("i")
                    )
                )]
            )
        );
    }

    #[test]
    fn statement_when_for_control_is_array_element_then_syntax_error() {
        let result = parse("PROGRAM wrapper FOR a[1] := 0 TO 5 DO x := 1; END_FOR END_PROGRAM");
        assert_eq!("P0004", result.unwrap_err().code);
    }

    #[test]
    fn statement_when_return_with_value_then_some() {
        assert_eq!(
            statement("RETURN x + 1;"),
            StmtKind::return_value(ExprKind::binary(
                Operator::Add,
                ExprKind::named_variable("x"),
                ExprKind::integer_literal(1)
            ))
        );
    }

    #[test]
    fn statement_when_bare_return_then_none() {
        assert_eq!(statement("RETURN;"), StmtKind::return_void());
    }

    #[test]
    fn statement_list_when_stray_semicolons_then_skipped() {
        let body = program_body("PROGRAM wrapper ;; x := 1; ; END_PROGRAM");
        assert_eq!(
            body,
            vec![StmtKind::simple_assignment(
                "x",
                ExprKind::integer_literal(1)
            )]
        );
    }

    #[test]
    fn var_block_when_multiple_entries_then_flattened_in_order() {
        let body = program_body(
            "PROGRAM wrapper
               VAR
                 a : INTEGER;
                 b : REAL := 1.5;
               END_VAR
               x := 1;
             END_PROGRAM",
        );
        assert_eq!(
            body,
            vec![
                StmtKind::VarDecl(VarDecl::simple("a", TypeName::Integer)),
                StmtKind::VarDecl(
                    VarDecl::simple("b", TypeName::Real)
                        .with_initializer(ExprKind::real_literal(1.5))
                ),
                StmtKind::simple_assignment("x", ExprKind::integer_literal(1)),
            ]
        );
    }

    #[test]
    fn var_block_when_input_then_entries_marked_input() {
        let body = program_body("PROGRAM wrapper VAR_INPUT n : INTEGER; END_VAR END_PROGRAM");
        match &body[0] {
            StmtKind::VarDecl(decl) => assert_eq!(VariableType::Input, decl.var_type),
            stmt => panic!("expected a declaration, got {:?}", stmt),
        }
    }

    #[test]
    fn array_decl_when_two_dimensions_then_dims_recorded() {
        let body = program_body(
            "PROGRAM wrapper VAR m : ARRAY[-3..3, 0..2] OF REAL; END_VAR END_PROGRAM",
        );
        match &body[0] {
            StmtKind::ArrayDecl(decl) => {
                assert_eq!(vec![Subrange::new(-3, 3), Subrange::new(0, 2)], decl.dims);
                assert_eq!(TypeName::Real, decl.element_type);
                assert_eq!(None, decl.initial_values);
            }
            stmt => panic!("expected an array declaration, got {:?}", stmt),
        }
    }

    #[test]
    fn array_decl_when_initializer_then_values_recorded() {
        let body = program_body(
            "PROGRAM wrapper VAR a : ARRAY[0..2] OF INTEGER := [1, 2, 3]; END_VAR END_PROGRAM",
        );
        match &body[0] {
            StmtKind::ArrayDecl(decl) => {
                assert_eq!(
                    Some(vec![
                        ExprKind::integer_literal(1),
                        ExprKind::integer_literal(2),
                        ExprKind::integer_literal(3),
                    ]),
                    decl.initial_values
                );
            }
            stmt => panic!("expected an array declaration, got {:?}", stmt),
        }
    }

    #[test]
    fn array_decl_when_bound_is_real_then_syntax_error() {
        let result = parse("PROGRAM wrapper VAR a : ARRAY[0..1.5] OF INTEGER; END_VAR END_PROGRAM");
        assert_eq!("P0004", result.unwrap_err().code);
    }

    #[test]
    fn library_when_empty_then_no_content() {
        assert_eq!("P0005", parse("").unwrap_err().code);
        assert_eq!("P0005", parse("(* only a comment *)").unwrap_err().code);
    }

    #[test]
    fn library_when_trailing_tokens_then_syntax_error() {
        let result = parse("PROGRAM p END_PROGRAM END_PROGRAM");
        assert_eq!("P0004", result.unwrap_err().code);
    }

    #[test]
    fn function_when_typed_then_return_type_recorded() {
        let library = parse(
            "FUNCTION double : INTEGER
               VAR_INPUT n : INTEGER; END_VAR
               RETURN n * 2;
             END_FUNCTION",
        )
        .unwrap();
        match &library.elements[0] {
            LibraryElementKind::FunctionDeclaration(function) => {
                assert_eq!(Id::from("double"), function.name);
                assert_eq!(Some(TypeName::Integer), function.return_type);
                assert_eq!(2, function.body.len());
            }
            element => panic!("expected a function, got {:?}", element),
        }
    }

    #[test]
    fn function_when_untyped_then_no_return_type() {
        let library = parse("FUNCTION log_cycle x := 1; END_FUNCTION");
        match &library.unwrap().elements[0] {
            LibraryElementKind::FunctionDeclaration(function) => {
                assert_eq!(None, function.return_type);
            }
            element => panic!("expected a function, got {:?}", element),
        }
    }

    #[test]
    fn library_when_multiple_units_then_order_preserved() {
        let library = parse(
            "FUNCTION f : INTEGER RETURN 1; END_FUNCTION
             FUNCTION_BLOCK counter x := x + 1; END_FUNCTION_BLOCK
             PROGRAM main y := f(); END_PROGRAM",
        )
        .unwrap();
        assert_eq!(3, library.elements.len());
        assert!(matches!(
            library.elements[0],
            LibraryElementKind::FunctionDeclaration(_)
        ));
        assert!(matches!(
            library.elements[1],
            LibraryElementKind::FunctionBlockDeclaration(_)
        ));
        assert!(matches!(
            library.elements[2],
            LibraryElementKind::ProgramDeclaration(_)
        ));
    }

    #[test]
    fn syntax_error_when_missing_then_then_line_reported() {
        let result = parse(
            "PROGRAM wrapper
               x := 1;
               IF x == 1
                 x := 2;
               END_IF
             END_PROGRAM",
        );
        let diagnostic = result.unwrap_err();
        assert_eq!("P0004", diagnostic.code);
        match diagnostic.primary.location {
            ferrost_dsl::diagnostic::Location::QualifiedPosition(position) => {
                assert_eq!(4, position.line)
            }
            _ => panic!("expected a qualified position"),
        }
    }
}
