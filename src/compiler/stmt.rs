use crate::ast::statements::Stmt;

use super::{compiler::Compiler, expr::gen_expression};

pub fn gen_statement(compiler: &Compiler, statement: &Stmt) -> String {
    match statement {
        Stmt::VarDecl(declaration) => match &declaration.initializer {
            Some(initializer) => format!(
                "let {} = {};\n",
                declaration.name,
                gen_expression(compiler, initializer)
            ),
            None => format!("let {};\n", declaration.name),
        },
        Stmt::Expression(expr) => format!("{};\n", gen_expression(compiler, expr)),
        Stmt::Print(expr) => format!("console.log({});\n", gen_expression(compiler, expr)),
        Stmt::Block(statements) => {
            format!("{{\n{}}}\n", compiler.indent(&compiler.compile(statements)))
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let then_code = gen_statement(compiler, then_branch);
            let condition = gen_expression(compiler, condition);

            match else_branch {
                Some(else_branch) => format!(
                    "if ({}) {} else {}",
                    condition,
                    then_code.trim_end_matches('\n'),
                    gen_statement(compiler, else_branch)
                ),
                None => format!("if ({}) {}", condition, then_code),
            }
        }
        Stmt::While { condition, body } => format!(
            "while ({}) {}",
            gen_expression(compiler, condition),
            gen_statement(compiler, body)
        ),
    }
}
