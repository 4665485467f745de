use tracing::debug;

use crate::{
    ast::{
        expressions::{Expr, LiteralExpr},
        statements::{Stmt, VarDeclStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::symbol_table::SymbolTable;

fn type_error(error: ErrorImpl) -> Error {
    Error::unpositioned(error)
}

fn type_mismatch(expected: &Type, received: &Type) -> Error {
    type_error(ErrorImpl::TypeMatchError {
        expected: expected.to_string(),
        received: received.to_string(),
    })
}

fn operand_error(operator: &Token, expected: &str, received: String) -> Error {
    type_error(ErrorImpl::OperandTypeError {
        operator: operator.value.clone(),
        expected: expected.to_string(),
        received,
    })
}

/// Result type of arithmetic on two numeric operands.
fn promote(left: &Type, right: &Type) -> Type {
    if *left == Type::Float || *right == Type::Float {
        Type::Float
    } else {
        Type::Int
    }
}

/// Walks statements depth-first, inferring expression types and checking
/// them against declarations. Stops at the first error.
#[derive(Debug, Default)]
pub struct TypeChecker {
    symbols: SymbolTable,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
        }
    }

    /// Runs `f` inside a fresh scope. The scope is popped whether or not `f`
    /// succeeds.
    fn with_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.symbols.push_scope();
        let result = f(self);
        self.symbols.pop_scope();
        result
    }

    pub fn check_statements(&mut self, statements: &[Stmt]) -> Result<(), Error> {
        for statement in statements {
            self.check_stmt(statement)?;
        }
        Ok(())
    }

    pub fn check_stmt(&mut self, statement: &Stmt) -> Result<(), Error> {
        match statement {
            Stmt::VarDecl(declaration) => self.check_var_decl(declaration),
            Stmt::Expression(expr) => self
                .infer_expr(expr)
                .map(|_| ())
                .map_err(|error| error.with_context("in expression statement")),
            Stmt::Print(expr) => self
                .infer_expr(expr)
                .map(|_| ())
                .map_err(|error| error.with_context("in print statement")),
            Stmt::Block(statements) => self.with_scope(|checker| checker.check_statements(statements)),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_condition(condition, "if")?;
                self.with_scope(|checker| checker.check_stmt(then_branch))?;
                if let Some(else_branch) = else_branch {
                    self.with_scope(|checker| checker.check_stmt(else_branch))?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                self.check_condition(condition, "while")?;
                self.with_scope(|checker| checker.check_stmt(body))
            }
        }
    }

    fn check_var_decl(&mut self, declaration: &VarDeclStmt) -> Result<(), Error> {
        let name = &declaration.name;

        let Some(declared) = declaration.declared_type.resolve() else {
            // `var` takes the type of its initializer, so the name only
            // becomes visible once the initializer has been checked.
            let initializer = declaration.initializer.as_ref().ok_or_else(|| {
                type_error(ErrorImpl::CannotInferType {
                    variable: name.clone(),
                })
            })?;
            let inferred = self.infer_expr(initializer)?;
            return self.symbols.declare(name, inferred);
        };

        self.symbols.declare(name, declared.clone())?;

        let Some(initializer) = &declaration.initializer else {
            return Ok(());
        };

        if declared.is_array() {
            if !initializer.is_array_shaped() {
                let received = self.infer_expr(initializer)?;
                return Err(type_error(ErrorImpl::ArrayTypeExpected {
                    variable: name.clone(),
                    received: received.to_string(),
                }));
            }
            return self.check_array_value(&declared, initializer);
        }

        let received = self.infer_expr(initializer)?;
        if received != declared {
            return Err(type_mismatch(&declared, &received));
        }

        Ok(())
    }

    /// `if`/`while` conditions accept anything that coerces to boolean.
    fn check_condition(&mut self, condition: &Expr, keyword: &str) -> Result<(), Error> {
        let ty = self
            .infer_expr(condition)
            .map_err(|error| error.with_context(format!("in {} condition", keyword)))?;

        match ty {
            Type::Boolean | Type::Int | Type::Float | Type::String => Ok(()),
            other => Err(type_error(ErrorImpl::ConditionTypeError {
                received: other.to_string(),
            })),
        }
    }

    /// Checks an array literal or allocation against the array type it is
    /// stored into. Nested literals are checked one dimension down, and an
    /// empty literal fits any array type.
    fn check_array_value(&mut self, target: &Type, value: &Expr) -> Result<(), Error> {
        let Expr::ArrayLiteral { elements } = value else {
            let received = self.infer_expr(value)?;
            return if received == *target {
                Ok(())
            } else {
                Err(type_mismatch(target, &received))
            };
        };

        let Some(element_type) = target.element() else {
            return Err(type_error(ErrorImpl::TypeMatchError {
                expected: target.to_string(),
                received: String::from("array literal"),
            }));
        };

        let mut first: Option<Type> = None;
        for element in elements {
            if matches!(element, Expr::ArrayLiteral { .. }) {
                self.check_array_value(element_type, element)?;
                continue;
            }

            let received = self.infer_expr(element)?;
            match &first {
                Some(first) if *first != received => {
                    return Err(type_error(ErrorImpl::ArrayElementMismatch {
                        first: first.to_string(),
                        received: received.to_string(),
                    }));
                }
                Some(_) => {}
                None => first = Some(received.clone()),
            }

            if received != *element_type {
                return Err(type_mismatch(element_type, &received));
            }
        }

        Ok(())
    }

    pub fn infer_expr(&mut self, expr: &Expr) -> Result<Type, Error> {
        match expr {
            Expr::Literal(literal) => infer_literal(literal),
            Expr::Variable { name } => self.lookup(name),
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.infer_expr(left)?;
                let right = self.infer_expr(right)?;
                infer_binary(operator, &left, &right)
            }
            Expr::Unary { operator, right } => match operator.kind {
                TokenKind::Dash | TokenKind::Plus => {
                    let ty = self.infer_expr(right)?;
                    if ty.is_numeric() {
                        Ok(ty)
                    } else {
                        Err(operand_error(operator, "numeric", ty.to_string()))
                    }
                }
                TokenKind::Not => {
                    let ty = self.infer_expr(right)?;
                    if ty == Type::Boolean {
                        Ok(ty)
                    } else {
                        Err(operand_error(operator, "boolean", ty.to_string()))
                    }
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => self.infer_increment(operator, right),
                _ => Err(type_error(ErrorImpl::UnsupportedOperator {
                    operator: operator.value.clone(),
                })),
            },
            Expr::Postfix { operand, operator } => self.infer_increment(operator, operand),
            Expr::Assignment {
                name,
                operator,
                right,
            } => self.infer_assignment(name, operator, right),
            Expr::Grouping { inner } => self
                .infer_expr(inner)
                .map_err(|error| error.with_context("in grouped expression")),
            Expr::ArrayLiteral { elements } => self.infer_array_literal(elements),
            Expr::NewArray {
                base_type,
                dimensions,
            } => {
                for dimension in dimensions.iter().flatten() {
                    let ty = self.infer_expr(dimension)?;
                    if ty != Type::Int {
                        return Err(type_error(ErrorImpl::ArrayDimensionType {
                            received: ty.to_string(),
                        }));
                    }
                }
                Ok(Type::array_of(base_type.to_type(), dimensions.len()))
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<Type, Error> {
        self.symbols.lookup(name).cloned().ok_or_else(|| {
            type_error(ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            })
        })
    }

    /// Prefix or postfix `++`/`--`: the operand must be a numeric variable.
    fn infer_increment(&mut self, operator: &Token, operand: &Expr) -> Result<Type, Error> {
        let Expr::Variable { name } = operand else {
            return Err(type_error(ErrorImpl::NotAVariable {
                operator: operator.value.clone(),
            }));
        };

        let ty = self.lookup(name)?;
        if ty.is_numeric() {
            Ok(ty)
        } else {
            Err(operand_error(operator, "numeric", ty.to_string()))
        }
    }

    fn infer_assignment(&mut self, name: &str, operator: &Token, right: &Expr) -> Result<Type, Error> {
        let target = self.lookup(name)?;

        if operator.kind != TokenKind::Assignment {
            // Compound `op=`: `target op right` must still fit the target.
            if !target.is_numeric() {
                return Err(operand_error(operator, "numeric", target.to_string()));
            }
            let received = self.infer_expr(right)?;
            if !received.is_numeric() {
                return Err(operand_error(operator, "numeric", received.to_string()));
            }
            let result = promote(&target, &received);
            if result != target {
                return Err(type_mismatch(&target, &result));
            }
            return Ok(target);
        }

        if target.is_array() {
            if !right.is_array_shaped() {
                let received = self.infer_expr(right)?;
                return Err(type_error(ErrorImpl::ArrayTypeExpected {
                    variable: name.to_string(),
                    received: received.to_string(),
                }));
            }
            self.check_array_value(&target, right)?;
            return Ok(target);
        }

        let received = self.infer_expr(right)?;
        if right.is_array_shaped() {
            return Err(type_error(ErrorImpl::ScalarTypeExpected {
                variable: name.to_string(),
                received: received.to_string(),
            }));
        }
        if received != target {
            return Err(type_mismatch(&target, &received));
        }

        Ok(target)
    }

    /// Every element must have the type of the first one.
    fn infer_array_literal(&mut self, elements: &[Expr]) -> Result<Type, Error> {
        let Some((first, rest)) = elements.split_first() else {
            return Err(type_error(ErrorImpl::UnknownLiteral {
                value: String::from("{}"),
            }));
        };

        let first = self.infer_expr(first)?;
        for element in rest {
            let received = self.infer_expr(element)?;
            if received != first {
                return Err(type_error(ErrorImpl::ArrayElementMismatch {
                    first: first.to_string(),
                    received: received.to_string(),
                }));
            }
        }

        Ok(Type::Array(Box::new(first)))
    }
}

fn infer_binary(operator: &Token, left: &Type, right: &Type) -> Result<Type, Error> {
    let received = || format!("{} and {}", left, right);

    match operator.kind {
        TokenKind::And | TokenKind::Or => {
            if *left == Type::Boolean && *right == Type::Boolean {
                Ok(Type::Boolean)
            } else {
                Err(operand_error(operator, "boolean", received()))
            }
        }
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals
        | TokenKind::Equals
        | TokenKind::NotEquals => {
            if left.is_numeric() && right.is_numeric() {
                Ok(Type::Boolean)
            } else {
                Err(operand_error(operator, "numeric", received()))
            }
        }
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
            if left.is_numeric() && right.is_numeric() {
                Ok(promote(left, right))
            } else {
                Err(operand_error(operator, "numeric", received()))
            }
        }
        _ => Err(type_error(ErrorImpl::UnsupportedOperator {
            operator: operator.value.clone(),
        })),
    }
}

fn infer_literal(literal: &LiteralExpr) -> Result<Type, Error> {
    match literal.kind {
        TokenKind::NumberLiteral => Ok(Type::Int),
        TokenKind::FloatLiteral => Ok(Type::Float),
        TokenKind::DoubleLiteral => Ok(Type::Double),
        TokenKind::CharLiteral => Ok(Type::Char),
        TokenKind::StringLiteral => Ok(Type::String),
        TokenKind::BooleanLiteral => Ok(Type::Boolean),
        _ => sniff_literal(&literal.value),
    }
}

/// Guesses a literal's type from its text, for literals built without a
/// literal token kind.
fn sniff_literal(value: &str) -> Result<Type, Error> {
    if value == "true" || value == "false" {
        return Ok(Type::Boolean);
    }
    if value.parse::<i64>().is_ok() {
        return Ok(Type::Int);
    }
    if let Some(number) = value.strip_suffix(['f', 'F']) {
        if number.parse::<f64>().is_ok() {
            return Ok(Type::Float);
        }
    }
    if value.parse::<f64>().is_ok() {
        return Ok(Type::Double);
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Ok(Type::String);
    }
    if value.len() >= 3 && value.starts_with('\'') && value.ends_with('\'') {
        return Ok(Type::Char);
    }

    Err(type_error(ErrorImpl::UnknownLiteral {
        value: value.to_string(),
    }))
}

/// Checks a parsed program, failing on the first semantic error.
pub fn analyze(statements: &[Stmt]) -> Result<(), Error> {
    let mut checker = TypeChecker::new();
    checker.check_statements(statements)?;

    debug!(statements = statements.len(), "type checked statements");
    Ok(())
}
