//! Unit tests for the type checker.

use crate::{
    ast::{
        expressions::Expr,
        statements::{Stmt, VarDeclStmt},
        types::{DeclaredType, PrimitiveType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
};

use super::{
    symbol_table::SymbolTable,
    type_checker::{analyze, TypeChecker},
};

fn check(source: &str) -> Result<(), Error> {
    let statements = match parse(tokenize(source)) {
        Ok(statements) => statements,
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    };
    analyze(&statements)
}

fn check_ok(source: &str) {
    if let Err(error) = check(source) {
        panic!("expected {:?} to type check: {}", source, error);
    }
}

fn check_err(source: &str) -> Error {
    match check(source) {
        Ok(()) => panic!("expected {:?} to fail type checking", source),
        Err(error) => error,
    }
}

fn mismatch(expected: &str, received: &str) -> ErrorImpl {
    ErrorImpl::TypeMatchError {
        expected: expected.to_string(),
        received: received.to_string(),
    }
}

#[test]
fn test_symbol_table_scopes() {
    let mut table = SymbolTable::new();
    assert!(table.declare("x", Type::Int).is_ok());
    assert_eq!(
        table.declare("x", Type::Float).map_err(|error| error.get_error_name().to_string()),
        Err(String::from("VariableAlreadyDeclared"))
    );

    table.push_scope();
    assert!(table.declare("x", Type::Float).is_ok());
    assert_eq!(table.lookup("x"), Some(&Type::Float));

    table.pop_scope();
    assert_eq!(table.lookup("x"), Some(&Type::Int));

    // The global scope is never popped.
    table.pop_scope();
    assert_eq!(table.lookup("x"), Some(&Type::Int));
    assert!(table.declare("x", Type::Float).is_err());
}

#[test]
fn test_simple_declaration() {
    check_ok("int x = 7;");
    check_ok("float f = 2.5f; double d = 3.14; char c = 'a'; boolean b = true;");
}

#[test]
fn test_int_declared_with_fraction() {
    let error = check_err("int x = 3.14;");
    assert_eq!(error.get_impl(), &mismatch("int", "double"));

    let error = check_err("int x = 3.14f;");
    assert_eq!(error.get_impl(), &mismatch("int", "float"));
}

#[test]
fn test_no_implicit_widening_in_declarations() {
    let error = check_err("float f = 1;");
    assert_eq!(error.get_impl(), &mismatch("float", "int"));
}

#[test]
fn test_undeclared_variable() {
    let error = check_err("print(y);");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_position(), None);
}

#[test]
fn test_redeclaration_in_same_scope() {
    let error = check_err("int x = 1; int x = 2;");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::VariableAlreadyDeclared {
            variable: String::from("x")
        }
    );
}

#[test]
fn test_outer_variable_visible_in_inner_block() {
    check_ok("{ int x = 1; { print(x); } }");
}

#[test]
fn test_inner_scope_is_popped() {
    check_ok("{ int y = 1; } int y = 2;");
    check_ok("int x = 1; { float x = 2.5f; } x = 3;");

    let error = check_err("{ int z = 1; } print(z);");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_scope_popped_after_error() {
    let mut checker = TypeChecker::new();
    let parse_ok = |source: &str| match parse(tokenize(source)) {
        Ok(statements) => statements,
        Err(error) => panic!("{}", error),
    };

    let failing = parse_ok("{ { int inner = 1; print(missing); } }");
    assert!(checker.check_statements(&failing).is_err());

    // Had the nested scopes leaked, `inner` would still be visible here.
    let after = parse_ok("int inner = 2; print(inner);");
    assert!(checker.check_statements(&after).is_ok());
}

#[test]
fn test_branches_have_their_own_scope() {
    check_ok("if (true) int x = 1; else int x = 2; int x = 3;");
    check_ok("int i = 0; while (i < 3) i++;");
}

#[test]
fn test_declared_name_visible_in_own_initializer() {
    check_ok("int x = x;");
}

#[test]
fn test_arithmetic_promotion() {
    check_ok("int a = 1 + 2 * 3;");
    check_ok("float f = 1 + 2.5f;");
    check_ok("float g = 2.5f / 2;");

    let error = check_err("int a = 1 + 2.5f;");
    assert_eq!(error.get_impl(), &mismatch("int", "float"));
}

#[test]
fn test_double_is_not_arithmetic() {
    let error = check_err("double d = 1.5; print(d + 1);");
    assert_eq!(error.root_cause().to_string(), "operator '+' requires numeric operands, received double and int");
}

#[test]
fn test_comparison_and_logic() {
    check_ok("boolean b = true; b = 1 < 2 && 2.5f >= 1 || !b;");

    let error = check_err("print(1 && true);");
    assert_eq!(error.get_error_name(), "OperandTypeError");

    let error = check_err("boolean b = true; print(b == b);");
    assert_eq!(error.get_error_name(), "OperandTypeError");
}

#[test]
fn test_unary_operators() {
    check_ok("int a = -1; float f = +2.5f; boolean b = false; b = !b;");

    assert_eq!(check_err("boolean b = true; print(-b);").get_error_name(), "OperandTypeError");
    assert_eq!(check_err("print(!1);").get_error_name(), "OperandTypeError");
}

#[test]
fn test_increment_requires_numeric_variable() {
    check_ok("int i = 0; i++; ++i; i--; --i;");

    let error = check_err("print(++1);");
    assert_eq!(
        error.root_cause(),
        &ErrorImpl::NotAVariable {
            operator: String::from("++")
        }
    );

    check_ok("int x = 1; int y = ++x * 2;");
    check_ok("float f = 1.5f; float g = 2.0f * --f;");

    let error = check_err("char c = 'a'; c++;");
    assert_eq!(error.get_error_name(), "OperandTypeError");
}

#[test]
fn test_assignment() {
    check_ok("int x = 1; x = 2;");

    let error = check_err("int x = 1; x = 2.5f;");
    assert_eq!(error.root_cause(), &mismatch("int", "float"));

    let error = check_err("x = 1;");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_compound_assignment() {
    check_ok("int x = 1; x += 2; x *= 3;");
    check_ok("float f = 1.5f; f -= 1; f /= 2.5f;");

    let error = check_err("int x = 1; x += 2.5f;");
    assert_eq!(error.root_cause(), &mismatch("int", "float"));

    let error = check_err("boolean b = true; b += 1;");
    assert_eq!(error.get_error_name(), "OperandTypeError");
}

#[test]
fn test_var_infers_from_initializer() {
    check_ok("var x = 1; int y = x;");
    check_ok("var f = 2.5f; float g = f;");
    check_ok("var grid = new int[2][3]; grid = new int[4][];");

    let error = check_err("var x = 1; float y = x;");
    assert_eq!(error.get_impl(), &mismatch("float", "int"));
}

#[test]
fn test_var_without_initializer() {
    let error = check_err("var x;");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::CannotInferType {
            variable: String::from("x")
        }
    );
}

#[test]
fn test_var_initializer_cannot_see_itself() {
    let error = check_err("var x = x;");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_conditions_coerce_to_boolean() {
    check_ok("if (true) print(1);");
    check_ok("int i = 1; if (i) print(i);");
    check_ok("float f = 1.5f; while (f) f = 0.5f;");
    check_ok("if (\"text\") print(1);");

    let error = check_err("char c = 'a'; if (c) print(c);");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ConditionTypeError {
            received: String::from("char")
        }
    );

    let error = check_err("double d = 1.0; while (d) print(d);");
    assert_eq!(error.get_error_name(), "ConditionTypeError");
}

#[test]
fn test_condition_errors_carry_context() {
    let error = check_err("if (missing) print(1);");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert!(error.to_string().starts_with("in if condition: "));
}

#[test]
fn test_print_and_grouping_context() {
    let error = check_err("print((1 + true));");
    assert_eq!(error.get_error_name(), "OperandTypeError");
    assert!(error
        .to_string()
        .starts_with("in print statement: in grouped expression: "));
}

#[test]
fn test_array_literals() {
    check_ok("int[] a = {1, 2, 3};");
    check_ok("char[][] grid = {{'a'}, {'b', 'c'}, {}};");
    check_ok("float[] empty = {};");

    let error = check_err("int[] a = {1, 2.5f};");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ArrayElementMismatch {
            first: String::from("int"),
            received: String::from("float")
        }
    );

    let error = check_err("int[] a = {2.5f};");
    assert_eq!(error.get_impl(), &mismatch("int", "float"));

    let error = check_err("int[][] a = {1, 2};");
    assert_eq!(error.get_impl(), &mismatch("int[]", "int"));
}

#[test]
fn test_new_array() {
    check_ok("int[] a = new int[3];");
    check_ok("int n = 2; boolean[][] flags = new boolean[n][n + 1];");
    check_ok("int[][] rows = new int[2][];");

    let error = check_err("int[] a = new int[2.5f];");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ArrayDimensionType {
            received: String::from("float")
        }
    );

    let error = check_err("int[] a = new float[3];");
    assert_eq!(error.get_impl(), &mismatch("int[]", "float[]"));

    let error = check_err("int[] a = new int[3][3];");
    assert_eq!(error.get_impl(), &mismatch("int[]", "int[][]"));
}

#[test]
fn test_array_assignment() {
    check_ok("int[] a = new int[2]; a = {4, 5}; a = new int[8];");

    let error = check_err("int[] a = {1}; int[] b = {2}; a = b;");
    assert_eq!(
        error.root_cause(),
        &ErrorImpl::ArrayTypeExpected {
            variable: String::from("a"),
            received: String::from("int[]")
        }
    );

    let error = check_err("int x = 1; x = new int[2];");
    assert_eq!(
        error.root_cause(),
        &ErrorImpl::ScalarTypeExpected {
            variable: String::from("x"),
            received: String::from("int[]")
        }
    );
}

#[test]
fn test_string_literal_is_not_declarable() {
    let error = check_err("char c = \"no\";");
    assert_eq!(error.get_impl(), &mismatch("char", "string"));
}

#[test]
fn test_literal_without_token_kind_is_sniffed() {
    let declaration = |value: &str, base: PrimitiveType| {
        Stmt::VarDecl(VarDeclStmt {
            declared_type: DeclaredType {
                base: Some(base),
                dimensions: 0,
            },
            name: String::from("v"),
            initializer: Some(Expr::literal(value, TokenKind::Identifier)),
        })
    };

    assert!(analyze(&[declaration("12", PrimitiveType::Int)]).is_ok());
    assert!(analyze(&[declaration("1.5f", PrimitiveType::Float)]).is_ok());
    assert!(analyze(&[declaration("1.5", PrimitiveType::Double)]).is_ok());
    assert!(analyze(&[declaration("true", PrimitiveType::Boolean)]).is_ok());

    let error = analyze(&[declaration("@@", PrimitiveType::Int)]).err();
    assert_eq!(
        error.map(|error| error.get_error_name().to_string()),
        Some(String::from("UnknownLiteral"))
    );
}
