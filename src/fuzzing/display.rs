use std::fmt;

use crate::parse::Node;

// Arithmetic is fully parenthesized so the printed source reparses to the same tree. A
// comparison is only ever printed as an IF/WHILE condition, where parentheses are not allowed.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Num(value) => write!(f, "{value}"),
            Node::Var(name) => write!(f, "{name}"),
            Node::Binary { op, left, right } if op.is_comparison() => {
                write!(f, "{left} {op} {right}")
            }
            Node::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            stmt => write_stmt(f, stmt, 0),
        }
    }
}

fn write_stmt(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        Node::Print(expr) => writeln!(f, "{pad}PRINT {expr}"),
        Node::Let { var, value } => writeln!(f, "{pad}LET {var} = {value}"),
        Node::Sequence(stmts) => stmts.iter().try_for_each(|s| write_stmt(f, s, indent)),
        Node::If {
            condition,
            then_branch,
            else_branch,
        } => {
            writeln!(f, "{pad}IF {condition} THEN")?;
            write_stmt(f, then_branch, indent + 1)?;
            if let Some(branch) = else_branch {
                writeln!(f, "{pad}ELSE")?;
                write_stmt(f, branch, indent + 1)?;
            }
            writeln!(f, "{pad}END IF")
        }
        Node::While { condition, body } => {
            writeln!(f, "{pad}WHILE {condition}")?;
            write_stmt(f, body, indent + 1)?;
            writeln!(f, "{pad}END WHILE")
        }
        expr => writeln!(f, "{pad}{expr}"),
    }
}
