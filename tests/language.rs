use std::fs;

use loxide::{
    ExitCode, Interpreter,
    ast::{Expr, Stmt},
    interpreter::{
        lexer::{Token, scan_tokens},
        parser::core::parse_program,
    },
};
use walkdir::WalkDir;

/// Runs `source` through a fresh interpreter, capturing both sinks.
fn run(source: &str) -> (ExitCode, String, String) {
    let mut output = Vec::new();
    let mut errors = Vec::new();
    let code = Interpreter::new(&mut output, &mut errors).interpret(source);

    (code,
     String::from_utf8(output).expect("program output is not UTF-8"),
     String::from_utf8(errors).expect("diagnostics are not UTF-8"))
}

fn assert_prints(source: &str, expected: &str) {
    let (code, output, errors) = run(source);
    assert_eq!(code, ExitCode::Success, "unexpected diagnostics:\n{errors}");
    assert_eq!(output, expected, "wrong output for:\n{source}");
}

fn assert_compile_error(source: &str, needle: &str) {
    let (code, output, errors) = run(source);
    assert_eq!(code, ExitCode::CompileError, "expected a compile error for:\n{source}");
    assert!(output.is_empty(), "nothing should run, but printed: {output}");
    assert!(errors.contains(needle), "missing '{needle}' in:\n{errors}");
}

fn assert_runtime_error(source: &str, needle: &str) {
    let (code, _, errors) = run(source);
    assert_eq!(code, ExitCode::RuntimeError, "expected a runtime error for:\n{source}");
    assert!(errors.contains(needle), "missing '{needle}' in:\n{errors}");
}

#[test]
fn arithmetic_and_precedence() {
    assert_prints("print 1 + 2;", "3\n");
    assert_prints("print 2 + 3 * 4;", "14\n");
    assert_prints("print (2 + 3) * 4;", "20\n");
    assert_prints("print 10 - 4 - 3;", "3\n");
    assert_prints("print 10 / 4;", "2.5\n");
    assert_prints("print (3 + 4) - 4 == 3;", "true\n");
}

#[test]
fn unary_operators() {
    assert_prints("print -3;", "-3\n");
    assert_prints("print --3;", "3\n");
    assert_prints("print !true;", "false\n");
    assert_prints("print !nil;", "true\n");
    assert_prints("print !0;", "false\n");
    assert_prints("print !!\"text\";", "true\n");
}

#[test]
fn string_concatenation() {
    assert_prints("print \"a\" + \"b\";", "ab\n");
    assert_prints("print \"one \" + \"two \" + \"three\";", "one two three\n");
}

#[test]
fn number_formatting_drops_integer_fractions() {
    assert_prints("print 2.5;", "2.5\n");
    assert_prints("print 3.0;", "3\n");
    assert_prints("print 100;", "100\n");
    assert_prints("print 0.5 + 0.25;", "0.75\n");
}

#[test]
fn equality_semantics() {
    assert_prints("print nil == nil;", "true\n");
    assert_prints("print nil == false;", "false\n");
    assert_prints("print 1 == 1;", "true\n");
    assert_prints("print 1 == \"1\";", "false\n");
    assert_prints("print \"a\" == \"a\";", "true\n");
    assert_prints("print true == true;", "true\n");
    assert_prints("print 1 != 2;", "true\n");
    // NaN compares unequal to itself, per IEEE 754.
    assert_prints("print 0 / 0 == 0 / 0;", "false\n");
}

#[test]
fn comparison_operators() {
    assert_prints("print 1 < 2;", "true\n");
    assert_prints("print 2 <= 2;", "true\n");
    assert_prints("print 3 > 4;", "false\n");
    assert_prints("print 4 >= 4;", "true\n");
}

#[test]
fn variables_declare_assign_and_shadow() {
    assert_prints("var a = 1; print a;", "1\n");
    assert_prints("var a; print a;", "nil\n");
    assert_prints("var a = 1; a = 2; print a;", "2\n");
    // Assignment is an expression and yields the assigned value.
    assert_prints("var a = 1; print a = 2;", "2\n");
    // Redeclaring in the same scope silently overwrites.
    assert_prints("var a = 1; var a = 2; print a;", "2\n");
}

#[test]
fn block_scoping() {
    assert_prints("var a = 1; { var a = 2; print a; } print a;", "2\n1\n");
    assert_prints("var a = 1; { a = 2; } print a;", "2\n");
    // A block-local variable does not leak out.
    assert_runtime_error("{ var hidden = 1; } print hidden;", "Undefined variable 'hidden'.");
}

#[test]
fn if_and_else() {
    assert_prints("if (1 < 2) print \"yes\"; else print \"no\";", "yes\n");
    assert_prints("if (1 > 2) print \"yes\"; else print \"no\";", "no\n");
    assert_prints("if (false) print \"skipped\";", "");
    // Non-boolean conditions go through truthiness: 0 is truthy.
    assert_prints("if (0) print \"truthy\";", "truthy\n");
}

#[test]
fn logical_operators_return_operands() {
    assert_prints("print 1 or 2;", "1\n");
    assert_prints("print nil or 2;", "2\n");
    assert_prints("print nil and 2;", "nil\n");
    assert_prints("print 1 and 2;", "2\n");
}

#[test]
fn logical_operators_short_circuit() {
    assert_prints("var a = 1; true or (a = 2); print a;", "1\n");
    assert_prints("var a = 1; false and (a = 2); print a;", "1\n");
    assert_prints("var a = 1; false or (a = 2); print a;", "2\n");
}

#[test]
fn while_loop() {
    assert_prints("var i = 0; while (i < 3) { print i; i = i + 1; }", "0\n1\n2\n");
    assert_prints("while (false) print \"never\";", "");
}

#[test]
fn for_loop_desugars_to_while() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
    // The initializer may be an expression over an existing variable.
    assert_prints("var i = 9; for (i = 0; i < 2; i = i + 1) print i; print i;",
                  "0\n1\n2\n");
    // Omitted increment.
    assert_prints("for (var i = 0; i < 2;) { print i; i = i + 1; }", "0\n1\n");
    // The loop variable is scoped to the loop.
    assert_runtime_error("for (var i = 0; i < 1; i = i + 1) {} print i;",
                         "Undefined variable 'i'.");
}

#[test]
fn function_declaration_and_calls() {
    assert_prints("fun greet() { print \"hi\"; } greet(); greet();", "hi\nhi\n");
    assert_prints("fun add(a, b) { print a + b; } add(6, 4);", "10\n");
    assert_prints("fun square(x) { return x * x; } print square(9);", "81\n");
    // Falling off the end returns nil.
    assert_prints("fun noop() {} print noop();", "nil\n");
    // Functions stringify by name.
    assert_prints("fun f() {} print f;", "<fn f>\n");
}

#[test]
fn function_locals_do_not_leak() {
    assert_prints("var v = 24; fun f() { var v = 42; print v; } f(); print v;",
                  "42\n24\n");
}

#[test]
fn recursion() {
    let source = r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 2) + fib(n - 1);
        }
        print fib(10);
    "#;
    assert_prints(source, "55\n");
}

#[test]
fn return_unwinds_nested_control_flow() {
    let source = r#"
        fun find() {
            var i = 0;
            while (true) {
                if (i == 3) return i;
                i = i + 1;
            }
        }
        print find();
    "#;
    assert_prints(source, "3\n");
}

#[test]
fn bare_return_yields_nil() {
    assert_prints("fun f() { return; } print f();", "nil\n");
}

#[test]
fn top_level_return_stops_the_program() {
    let (code, output, _) = run("print 1; return; print 2;");
    assert_eq!(code, ExitCode::Success);
    assert_eq!(output, "1\n");
}

#[test]
fn closures_capture_their_defining_scope() {
    let source = r#"
        var x = "global";
        fun outer() {
            var x = "outer";
            fun inner() { print x; }
            inner();
        }
        outer();
        print x;
    "#;
    assert_prints(source, "outer\nglobal\n");
}

#[test]
fn closures_share_mutable_state_across_calls() {
    let source = r#"
        fun counter() {
            var i = 0;
            fun inc() {
                i = i + 1;
                return i;
            }
            return inc;
        }
        var f = counter();
        print f();
        print f();
    "#;
    assert_prints(source, "1\n2\n");
}

#[test]
fn each_closure_gets_its_own_state() {
    let source = r#"
        fun counter() {
            var i = 0;
            fun inc() {
                i = i + 1;
                return i;
            }
            return inc;
        }
        var first = counter();
        var second = counter();
        print first();
        print first();
        print second();
    "#;
    assert_prints(source, "1\n2\n1\n");
}

#[test]
fn runtime_type_errors() {
    assert_runtime_error("print 1 + \"a\";", "Operands must be two numbers or two strings");
    assert_runtime_error("print 1 + \"a\";", "[line 1]");
    assert_runtime_error("print -\"a\";", "Operand must be a number");
    assert_runtime_error("print 1 < \"a\";", "Operands must be a numbers");
    assert_runtime_error("print \"a\" * 2;", "Operands must be a numbers");
}

#[test]
fn undefined_variables_are_runtime_errors() {
    assert_runtime_error("print x;", "Undefined variable 'x'.");
    assert_runtime_error("x = 1;", "Undefined variable 'x'.");
}

#[test]
fn calling_a_non_function_is_a_runtime_error() {
    assert_runtime_error("\"text\"();", "Can only call functions and classes.");
    assert_runtime_error("var x = 1; x();", "Can only call functions and classes.");
}

#[test]
fn arity_is_checked_before_the_body_runs() {
    assert_runtime_error("fun f(a) {} f(1, 2);", "Expected 1 arguments but got 2.");
    assert_runtime_error("fun f(a, b) {} f(1);", "Expected 2 arguments but got 1.");
}

#[test]
fn runtime_errors_abort_the_remaining_statements() {
    let (code, output, errors) = run("print 1; print missing; print 2;");
    assert_eq!(code, ExitCode::RuntimeError);
    assert_eq!(output, "1\n");
    assert!(errors.contains("Undefined variable 'missing'."));
}

#[test]
fn runtime_errors_report_the_right_line() {
    let (_, _, errors) = run("var a = 1;\nvar b = 2;\nprint a + b + missing;");
    assert!(errors.contains("[line 3]"), "wrong line in:\n{errors}");
}

#[test]
fn unterminated_string_is_a_compile_error() {
    assert_compile_error("print \"hi;", "Unterminated string");
    // The line reported is where the input ran out, not where the string
    // started.
    let (_, _, errors) = run("print\n\"abc");
    assert!(errors.contains("[line 2]"), "wrong line in:\n{errors}");
}

#[test]
fn stray_characters_are_reported_and_scanning_continues() {
    assert_compile_error("@", "Unexpected character: @");
    // Both the stray character and the later parse error surface.
    let (_, _, errors) = run("#\nprint +;");
    assert!(errors.contains("Unexpected character: #"), "missing scan error in:\n{errors}");
    assert!(errors.contains("Expect expression."), "missing parse error in:\n{errors}");
}

#[test]
fn missing_semicolon_is_reported_at_end() {
    assert_compile_error("print 1", "[line 1] Error at end: Expect ';' after value.");
}

#[test]
fn invalid_assignment_target_is_reported() {
    assert_compile_error("1 = 2;", "Invalid assignment target");
    assert_compile_error("a + b = 1;", "Invalid assignment target");
}

#[test]
fn parser_recovers_and_reports_every_error() {
    let (code, _, errors) = run("var 1 = 2;\nprint +;\n");
    assert_eq!(code, ExitCode::CompileError);
    assert!(errors.contains("Expect variable name."), "first error lost:\n{errors}");
    assert!(errors.contains("Expect expression."), "second error lost:\n{errors}");
    assert_eq!(errors.lines().count(), 2, "expected exactly two diagnostics:\n{errors}");
}

#[test]
fn compile_errors_suppress_evaluation() {
    let (code, output, _) = run("print \"ran\";\nvar = 1;");
    assert_eq!(code, ExitCode::CompileError);
    assert!(output.is_empty(), "statement before the error still ran: {output}");
}

#[test]
fn argument_and_parameter_limits() {
    let arguments = vec!["0"; 256].join(", ");
    assert_compile_error(&format!("fun f() {{}} f({arguments});"),
                         "Can't have more than 255 arguments.");

    let params: Vec<String> = (0..256).map(|i| format!("p{i}")).collect();
    assert_compile_error(&format!("fun f({}) {{}}", params.join(", ")),
                         "Can't have more than 255 parameters.");
}

#[test]
fn sessions_keep_definitions_across_calls() {
    let mut output = Vec::new();
    let mut errors = Vec::new();
    let mut interpreter = Interpreter::new(&mut output, &mut errors);

    assert_eq!(interpreter.interpret("fun double(x) { return x * 2; }"), ExitCode::Success);
    assert_eq!(interpreter.interpret("print double(21);"), ExitCode::Success);
    assert_eq!(output, b"42\n");
}

#[test]
fn sessions_recover_from_bad_lines() {
    let mut output = Vec::new();
    let mut errors = Vec::new();
    let mut interpreter = Interpreter::new(&mut output, &mut errors);

    // A compile error on one line does not poison the next.
    assert_eq!(interpreter.interpret("print ;"), ExitCode::CompileError);
    assert_eq!(interpreter.interpret("print 1;"), ExitCode::Success);

    // Definitions made before a runtime error survive it.
    assert_eq!(interpreter.interpret("var kept = 7; print missing;"),
               ExitCode::RuntimeError);
    assert_eq!(interpreter.interpret("print kept;"), ExitCode::Success);

    assert_eq!(output, b"1\n7\n");
}

#[test]
fn evaluation_is_deterministic() {
    let source = r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 2) + fib(n - 1);
        }
        for (var i = 0; i < 10; i = i + 1) print fib(i);
    "#;
    let first = run(source);
    let second = run(source);
    assert_eq!(first, second);
}

#[test]
fn token_stream_ends_with_a_single_eof() {
    let (tokens, errors) = scan_tokens("var a = 1;\n// comment\nprint a;");
    assert!(errors.is_empty());
    assert_eq!(tokens.iter().filter(|(token, _)| *token == Token::Eof).count(), 1);
    assert!(matches!(tokens.last(), Some((Token::Eof, _))));
}

#[test]
fn lexer_tracks_lines_through_comments_and_strings() {
    let (tokens, errors) = scan_tokens("var a = \"one\ntwo\";\n// note\nprint a;");
    assert!(errors.is_empty());

    // The string token carries the line it ends on.
    let string_line = tokens.iter()
                            .find_map(|(token, line)| match token {
                                Token::Str(s) if s == "one\ntwo" => Some(*line),
                                _ => None,
                            })
                            .expect("string token missing");
    assert_eq!(string_line, 2);

    let print_line = tokens.iter()
                           .find_map(|(token, line)| {
                               matches!(token, Token::Print).then_some(*line)
                           })
                           .expect("print token missing");
    assert_eq!(print_line, 4);
}

#[test]
fn a_trailing_dot_is_not_part_of_a_number() {
    let (tokens, errors) = scan_tokens("1.");
    assert!(errors.is_empty());
    let kinds: Vec<&Token> = tokens.iter().map(|(token, _)| token).collect();
    assert!(matches!(kinds.as_slice(), [Token::Number(n), Token::Dot, Token::Eof] if *n == 1.0));
}

/// Parses a single expression statement and hands back the expression.
fn parse_expr(source: &str) -> Expr {
    let (tokens, scan_errors) = scan_tokens(source);
    assert!(scan_errors.is_empty(), "{scan_errors:?}");

    let mut stream = tokens.iter().peekable();
    let mut errors = Vec::new();
    let statements = parse_program(&mut stream, &mut errors);
    assert!(errors.is_empty(), "{errors:?}");

    match statements.into_iter().next() {
        Some(Stmt::Expression { expr }) => expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn printer_round_trips_parser_output() {
    let sources = ["1 + 2 * 3",
                   "(1 + 2) * 3",
                   "-x + !y",
                   "a = b = c or d and e",
                   "f(1, \"two\", nil)(true)",
                   "1 < 2 == 3 >= 4",
                   "-(1 / 2) - -3",
                   "!(a == b)"];

    for source in sources {
        let expr = parse_expr(&format!("{source};"));
        let printed = expr.to_string();
        let reparsed = parse_expr(&format!("{printed};"));
        assert_eq!(reparsed, expr, "printing `{source}` as `{printed}` did not round-trip");
    }
}

#[test]
fn script_files_match_their_expectations() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "lox")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        let (code, output, errors) = run(&source);
        assert_eq!(code, ExitCode::Success, "{path:?} failed:\n{errors}");
        assert_eq!(output, expected_output(&source), "{path:?} printed unexpected output");
        count += 1;
    }

    assert!(count > 0, "no .lox scripts found under tests/scripts");
}

/// Collects the `// expect:` annotations of a script, in order.
fn expected_output(source: &str) -> String {
    let mut expected = String::new();
    for line in source.lines() {
        if let Some((_, expectation)) = line.split_once("// expect: ") {
            expected.push_str(expectation);
            expected.push('\n');
        }
    }
    expected
}
