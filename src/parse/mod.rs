pub mod error;

use std::fmt;

use crate::parse::error::{PResult, ParserError};
use crate::tokenize::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    Greater,
    Less,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(self, BinaryOp::Equal | BinaryOp::Greater | BinaryOp::Less)
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Equal => '=',
            BinaryOp::Greater => '>',
            BinaryOp::Less => '<',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A node of the program tree. Variables are single letters `A`..=`Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Num(i64),
    Var(char),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Print(Box<Node>),
    Sequence(Vec<Node>),
    Let {
        var: char,
        value: Box<Node>,
    },
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
}

impl Node {
    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn print(expr: Node) -> Self {
        Node::Print(Box::new(expr))
    }

    pub fn assign(var: char, value: Node) -> Self {
        Node::Let {
            var,
            value: Box::new(value),
        }
    }

    pub fn if_else(condition: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(condition: Node, body: Node) -> Self {
        Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    /// The operator of a comparison node, if this is one.
    pub fn comparison_op(&self) -> Option<BinaryOp> {
        match self {
            Node::Binary { op, .. } if op.is_comparison() => Some(*op),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Num(_) => "number",
            Node::Var(_) => "variable",
            Node::Binary { op, .. } if op.is_comparison() => "comparison",
            Node::Binary { .. } => "arithmetic expression",
            Node::Print(_) => "PRINT",
            Node::Sequence(_) => "sequence",
            Node::Let { .. } => "LET",
            Node::If { .. } => "IF",
            Node::While { .. } => "WHILE",
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> PResult<Node> {
        let stmts = self.stmts(&[])?;
        self.ensure_done()?;
        Ok(Node::Sequence(stmts))
    }

    /// Statements up to (not including) one of `terminators` or the end of input.
    fn stmts(&mut self, terminators: &[TokenKind]) -> PResult<Vec<Node>> {
        let mut out = vec![];
        while let Some(kind) = self.peek_kind() {
            if terminators.contains(&kind) {
                break;
            }
            out.push(self.stmt()?);
        }
        Ok(out)
    }

    fn stmt(&mut self) -> PResult<Node> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Print => {
                self.advance()?;
                Ok(Node::print(self.expr()?))
            }
            TokenKind::Let => self.let_stmt(),
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            other => Err(ParserError::ExpectedStatement(other)),
        }
    }

    fn let_stmt(&mut self) -> PResult<Node> {
        self.advance()?; // LET
        let var = match self.peek_kind() {
            Some(TokenKind::Variable(name)) => name,
            found => return Err(ParserError::ExpectedVariable(found)),
        };
        self.advance()?;
        self.expect(&TokenKind::Equal)?;
        Ok(Node::assign(var, self.expr()?))
    }

    fn if_stmt(&mut self) -> PResult<Node> {
        self.advance()?; // IF
        let condition = self.comparison()?;
        self.expect(&TokenKind::Then)?;
        let then_branch = Node::Sequence(self.stmts(&[TokenKind::Else, TokenKind::End])?);
        let else_branch = if matches!(self.peek_kind(), Some(TokenKind::Else)) {
            self.advance()?;
            Some(Node::Sequence(self.stmts(&[TokenKind::End])?))
        } else {
            None
        };
        self.expect(&TokenKind::End)?;
        self.expect(&TokenKind::If)?;
        Ok(Node::if_else(condition, then_branch, else_branch))
    }

    fn while_stmt(&mut self) -> PResult<Node> {
        self.advance()?; // WHILE
        let condition = self.comparison()?;
        let body = Node::Sequence(self.stmts(&[TokenKind::End])?);
        self.expect(&TokenKind::End)?;
        self.expect(&TokenKind::While)?;
        Ok(Node::while_loop(condition, body))
    }

    fn comparison(&mut self) -> PResult<Node> {
        let left = self.expr()?;
        let op = match self.peek_kind() {
            Some(TokenKind::Equal) => BinaryOp::Equal,
            Some(TokenKind::LessThan) => BinaryOp::Less,
            Some(TokenKind::GreaterThan) => BinaryOp::Greater,
            found => return Err(ParserError::ExpectedComparison(found)),
        };
        self.advance()?;
        let right = self.expr()?;
        Ok(Node::binary(op, left, right))
    }

    fn expr(&mut self) -> PResult<Node> {
        let mut node = self.term()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            node = Node::binary(op, node, self.term()?);
        }

        Ok(node)
    }

    fn term(&mut self) -> PResult<Node> {
        let mut node = self.factor()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance()?;
            node = Node::binary(op, node, self.factor()?);
        }

        Ok(node)
    }

    fn factor(&mut self) -> PResult<Node> {
        match self.peek_kind() {
            Some(TokenKind::Number(n)) => {
                self.advance()?;
                let value =
                    i64::try_from(n).map_err(|_| ParserError::LiteralOutOfRange(n.to_string()))?;
                Ok(Node::Num(value))
            }
            Some(TokenKind::Minus) => {
                self.advance()?;
                match self.peek_kind() {
                    Some(TokenKind::Number(n)) => {
                        self.advance()?;
                        negate_magnitude(n).map(Node::Num)
                    }
                    found => Err(ParserError::ExpectedNumber(found)),
                }
            }
            Some(TokenKind::Variable(name)) => {
                self.advance()?;
                Ok(Node::Var(name))
            }
            Some(TokenKind::LParen) => {
                self.advance()?;
                let inner = self.expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            found => Err(ParserError::ExpectedPrimary(found)),
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind.clone())
    }

    fn peek(&self) -> PResult<Token> {
        self.tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParserError::UnexpectedEof(""))
    }

    fn advance(&mut self) -> PResult<()> {
        if self.pos >= self.tokens.len() {
            return Err(ParserError::UnexpectedEof(""));
        }
        self.pos += 1;
        Ok(())
    }

    fn expect(&mut self, kind: &TokenKind) -> PResult<()> {
        let found = self.peek_kind();
        match found {
            Some(ref k) if k == kind => self.advance(),
            None => Err(ParserError::UnexpectedEof(match kind {
                TokenKind::End => ", missing END",
                TokenKind::If => ", missing END IF",
                TokenKind::While => ", missing END WHILE",
                _ => "",
            })),
            Some(_) => Err(ParserError::ExpectedToken(kind.clone(), found)),
        }
    }

    fn ensure_done(&self) -> PResult<()> {
        match self.peek_kind() {
            None => Ok(()),
            Some(kind) => Err(ParserError::ExpectedStatement(kind)),
        }
    }
}

fn negate_magnitude(n: u64) -> PResult<i64> {
    if n == i64::MIN.unsigned_abs() {
        return Ok(i64::MIN);
    }
    i64::try_from(n)
        .map(|v| -v)
        .map_err(|_| ParserError::LiteralOutOfRange(format!("-{n}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn parse(source: &str) -> PResult<Node> {
        Parser::new(tokenize(source).expect("tokenize failed")).parse()
    }

    #[test]
    fn precedence_and_associativity() {
        let ast = parse("PRINT 1 - 2 - 3 * 4").unwrap();
        let expected = Node::Sequence(vec![Node::print(Node::binary(
            BinaryOp::Sub,
            Node::binary(BinaryOp::Sub, Node::Num(1), Node::Num(2)),
            Node::binary(BinaryOp::Mul, Node::Num(3), Node::Num(4)),
        ))]);
        assert_eq!(ast, expected);
    }

    #[test]
    fn if_with_else_and_while() {
        let ast = parse(
            "LET I = 0
             WHILE I < 3
               IF I = 1 THEN PRINT I ELSE PRINT -1 END IF
               LET I = I + 1
             END WHILE",
        )
        .unwrap();
        let body = Node::Sequence(vec![
            Node::if_else(
                Node::binary(BinaryOp::Equal, Node::Var('I'), Node::Num(1)),
                Node::Sequence(vec![Node::print(Node::Var('I'))]),
                Some(Node::Sequence(vec![Node::print(Node::Num(-1))])),
            ),
            Node::assign(
                'I',
                Node::binary(BinaryOp::Add, Node::Var('I'), Node::Num(1)),
            ),
        ]);
        let expected = Node::Sequence(vec![
            Node::assign('I', Node::Num(0)),
            Node::while_loop(
                Node::binary(BinaryOp::Less, Node::Var('I'), Node::Num(3)),
                body,
            ),
        ]);
        assert_eq!(ast, expected);
    }

    #[test]
    fn most_negative_literal() {
        assert_eq!(
            parse("PRINT -9223372036854775808").unwrap(),
            Node::Sequence(vec![Node::print(Node::Num(i64::MIN))])
        );
        assert_eq!(
            parse("PRINT 9223372036854775808"),
            Err(ParserError::LiteralOutOfRange(
                "9223372036854775808".to_string()
            ))
        );
    }

    #[test]
    fn condition_requires_comparison() {
        assert_eq!(
            parse("IF A THEN PRINT A END IF"),
            Err(ParserError::ExpectedComparison(Some(TokenKind::Then)))
        );
    }

    #[test]
    fn unterminated_while() {
        assert_eq!(
            parse("WHILE A < 1 PRINT A"),
            Err(ParserError::UnexpectedEof(", missing END"))
        );
    }
}
