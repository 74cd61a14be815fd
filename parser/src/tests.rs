//! Tests of parsing complete programs.
#[cfg(test)]
mod test {
    use ferrost_dsl::common::*;
    use ferrost_dsl::core::{FileId, Id};
    use ferrost_dsl::textual::*;

    use crate::parse_program;

    #[test]
    fn parse_program_when_declarations_and_arithmetic_then_expected_tree() {
        let source = "
        PROGRAM main
          VAR
            x : INTEGER;
          END_VAR
          x := 2 + 3 * 4;
        END_PROGRAM";

        let library = parse_program(source, &FileId::default()).unwrap();

        let expected = Library {
            elements: vec![LibraryElementKind::ProgramDeclaration(ProgramDeclaration {
                name: Id::from("main"),
                body: vec![
                    StmtKind::VarDecl(VarDecl::simple("x", TypeName::Integer)),
                    StmtKind::simple_assignment(
                        "x",
                        ExprKind::binary(
                            Operator::Add,
                            ExprKind::integer_literal(2),
                            ExprKind::binary(
                                Operator::Mul,
                                ExprKind::integer_literal(3),
                                ExprKind::integer_literal(4),
                            ),
                        ),
                    ),
                ],
            })],
        };
        assert_eq!(expected, library);
    }

    #[test]
    fn parse_program_when_keywords_lower_case_then_same_tree() {
        let upper = parse_program(
            "PROGRAM main VAR x : INTEGER; END_VAR x := 1; END_PROGRAM",
            &FileId::default(),
        )
        .unwrap();
        let lower = parse_program(
            "program main var x : integer; end_var x := 1; end_program",
            &FileId::default(),
        )
        .unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parse_program_when_comments_everywhere_then_ignored() {
        let source = "
        (* unit under test *)
        PROGRAM main // trailing comment
          VAR
            x : INTEGER; (* inline (with parenthesis) comment *)
          END_VAR
          x := 1; (* multi
                     line
                     comment *)
        END_PROGRAM";

        let library = parse_program(source, &FileId::default()).unwrap();
        assert_eq!(1, library.elements.len());
    }

    #[test]
    fn parse_program_when_nested_control_flow_then_bodies_nest() {
        let source = "
        PROGRAM main
          VAR
            n : INTEGER;
            total : INTEGER;
          END_VAR
          FOR i := 1 TO 10 DO
            IF total < 100 THEN
              WHILE n < i DO
                n := n + 1;
              END_WHILE
              total := total + n;
            ELSE
              total := 100;
            END_IF
          END_FOR
        END_PROGRAM";

        let library = parse_program(source, &FileId::default()).unwrap();
        let program = match &library.elements[0] {
            LibraryElementKind::ProgramDeclaration(program) => program,
            element => panic!("expected a program, got {:?}", element),
        };
        let for_stmt = match &program.body[2] {
            StmtKind::For(for_stmt) => for_stmt,
            stmt => panic!("expected a for loop, got {:?}", stmt),
        };
        let if_stmt = match &for_stmt.body[0] {
            StmtKind::If(if_stmt) => if_stmt,
            stmt => panic!("expected an if, got {:?}", stmt),
        };
        assert!(matches!(if_stmt.body[0], StmtKind::While(_)));
        assert_eq!(2, if_stmt.body.len());
        assert_eq!(1, if_stmt.else_body.len());
    }

    #[test]
    fn parse_program_when_function_called_in_expression_then_tree_has_call() {
        let source = "
        FUNCTION square : INTEGER
          VAR_INPUT n : INTEGER; END_VAR
          RETURN n * n;
        END_FUNCTION
        PROGRAM main
          VAR y : INTEGER; END_VAR
          y := square(4) + 1;
        END_PROGRAM";

        let library = parse_program(source, &FileId::default()).unwrap();
        assert_eq!(2, library.elements.len());
    }

    #[test]
    fn parse_program_when_declaration_inside_branch_then_statement_position() {
        let source = "
        PROGRAM main
          VAR a : BOOLEAN; END_VAR
          IF a THEN
            VAR scratch : INTEGER; END_VAR
            scratch := 1;
          END_IF
        END_PROGRAM";

        let library = parse_program(source, &FileId::default()).unwrap();
        let program = match &library.elements[0] {
            LibraryElementKind::ProgramDeclaration(program) => program,
            element => panic!("expected a program, got {:?}", element),
        };
        let if_stmt = match &program.body[1] {
            StmtKind::If(if_stmt) => if_stmt,
            stmt => panic!("expected an if, got {:?}", stmt),
        };
        assert!(matches!(if_stmt.body[0], StmtKind::VarDecl(_)));
    }

    #[test]
    fn parse_program_when_missing_semicolon_then_syntax_error() {
        let source = "PROGRAM main x := 1 END_PROGRAM";
        let diagnostic = parse_program(source, &FileId::default()).unwrap_err();
        assert_eq!("P0004", diagnostic.code);
    }

    #[test]
    fn parse_program_when_unclosed_unit_then_error_at_end_of_file() {
        let source = "PROGRAM main x := 1;";
        let diagnostic = parse_program(source, &FileId::default()).unwrap_err();
        assert_eq!("P0004", diagnostic.code);
        assert!(diagnostic.primary.message.contains("ended"));
    }

    #[test]
    fn parse_program_when_lex_error_then_lex_diagnostic_wins() {
        // The `=` is a lexical error, so parsing never starts.
        let source = "PROGRAM main x = 1; END_PROGRAM";
        let diagnostic = parse_program(source, &FileId::default()).unwrap_err();
        assert_eq!("P0001", diagnostic.code);
    }
}
