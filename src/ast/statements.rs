use super::{expressions::Expr, types::DeclaredType};

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub declared_type: DeclaredType,
    pub name: String,
    pub initializer: Option<Expr>,
}

impl VarDeclStmt {
    pub fn is_array(&self) -> bool {
        self.declared_type.is_array()
    }
}

/// Statement tree. Every node owns its children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Expression(Expr),
    Print(Expr),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
}
