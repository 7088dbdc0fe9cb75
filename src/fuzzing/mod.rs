// Random programs that parse, pass validation, terminate, and never fault at run time, so the
// compiled binary and the interpreter can be compared on them.

pub mod display;

use quickcheck::{Arbitrary, Gen, empty_shrinker};

use crate::parse::{BinaryOp, Node};

const MAX_DEPTH: usize = 3;
const MAX_STATEMENTS: usize = 6;
// Only assigned as loop counters, so a body can never keep its own loop running.
const LOOP_COUNTERS: [char; MAX_DEPTH] = ['I', 'J', 'K'];
const VARIABLES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

#[derive(Debug, Clone)]
pub struct Program(pub Node);

pub fn generate() -> String {
    let mut qc_gen = Gen::new(16);
    Program::arbitrary(&mut qc_gen).0.to_string()
}

impl Arbitrary for Program {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut scope = Scope::default();
        let count = usize::arbitrary(g) % MAX_STATEMENTS + 2;
        Program(Node::Sequence(random_block(g, &mut scope, count, 0)))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        empty_shrinker()
    }
}

/// Variables that are certain to hold a value at the current point.
#[derive(Debug, Default, Clone)]
struct Scope {
    defined: Vec<char>,
    loops: usize,
}

impl Scope {
    fn define(&mut self, name: char) {
        if !self.defined.contains(&name) {
            self.defined.push(name);
        }
    }
}

fn random_block(g: &mut Gen, scope: &mut Scope, count: usize, depth: usize) -> Vec<Node> {
    let mut stmts = vec![];
    for _ in 0..count {
        match random_stmt(g, scope, depth) {
            // The parser never nests sequences, so neither does the generator.
            Node::Sequence(inner) => stmts.extend(inner),
            stmt => stmts.push(stmt),
        }
    }
    stmts
}

fn random_stmt(g: &mut Gen, scope: &mut Scope, depth: usize) -> Node {
    let choices = if depth < MAX_DEPTH { 5 } else { 3 };
    match usize::arbitrary(g) % choices {
        0 => Node::print(random_expr(g, scope, 0)),
        1 | 2 => {
            let var = random_choice(g, &VARIABLES);
            let value = random_expr(g, scope, 0);
            scope.define(var);
            Node::assign(var, value)
        }
        3 => random_if(g, scope, depth),
        _ if scope.loops < LOOP_COUNTERS.len() => random_while(g, scope, depth),
        _ => random_if(g, scope, depth),
    }
}

fn random_if(g: &mut Gen, scope: &Scope, depth: usize) -> Node {
    let condition = random_comparison(g, scope);
    let then_branch = random_branch(g, scope, depth + 1);
    let else_branch = bool::arbitrary(g).then(|| random_branch(g, scope, depth + 1));
    Node::if_else(condition, then_branch, else_branch)
}

fn random_branch(g: &mut Gen, scope: &Scope, depth: usize) -> Node {
    // Assignments inside a branch may not run, so they do not escape it.
    let mut inner = scope.clone();
    let count = usize::arbitrary(g) % 3 + 1;
    Node::Sequence(random_block(g, &mut inner, count, depth))
}

/// `LET I = 0 / WHILE I < n ... LET I = I + 1 / END WHILE`
fn random_while(g: &mut Gen, scope: &Scope, depth: usize) -> Node {
    let counter = LOOP_COUNTERS[scope.loops];
    let bound = (u8::arbitrary(g) % 5) as i64;

    let mut inner = scope.clone();
    inner.loops += 1;
    inner.define(counter);
    let count = usize::arbitrary(g) % 3 + 1;
    let mut body = random_block(g, &mut inner, count, depth + 1);
    body.push(Node::assign(
        counter,
        Node::binary(BinaryOp::Add, Node::Var(counter), Node::Num(1)),
    ));

    Node::Sequence(vec![
        Node::assign(counter, Node::Num(0)),
        Node::while_loop(
            Node::binary(BinaryOp::Less, Node::Var(counter), Node::Num(bound)),
            Node::Sequence(body),
        ),
    ])
}

fn random_comparison(g: &mut Gen, scope: &Scope) -> Node {
    let op = random_choice(g, &[BinaryOp::Equal, BinaryOp::Greater, BinaryOp::Less]);
    Node::binary(op, random_expr(g, scope, 1), random_expr(g, scope, 1))
}

fn random_expr(g: &mut Gen, scope: &Scope, depth: usize) -> Node {
    if depth >= MAX_DEPTH || usize::arbitrary(g) % 3 == 0 {
        return random_leaf(g, scope);
    }
    let op = random_choice(g, &[BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div]);
    let left = random_expr(g, scope, depth + 1);
    let right = match op {
        // A nonzero literal other than -1 keeps division from faulting.
        BinaryOp::Div => {
            let magnitude = (u8::arbitrary(g) % 9 + 1) as i64;
            match magnitude {
                1 => Node::Num(1),
                m if bool::arbitrary(g) => Node::Num(-m),
                m => Node::Num(m),
            }
        }
        _ => random_expr(g, scope, depth + 1),
    };
    Node::binary(op, left, right)
}

fn random_leaf(g: &mut Gen, scope: &Scope) -> Node {
    match usize::arbitrary(g) % 4 {
        0 | 1 if !scope.defined.is_empty() => Node::Var(random_choice(g, &scope.defined)),
        0 => Node::Num(1 << (u8::arbitrary(g) % 8)),
        1 => Node::Num(i64::arbitrary(g)),
        _ => Node::Num((i16::arbitrary(g) % 100) as i64),
    }
}

fn random_choice<T: Copy>(g: &mut Gen, items: &[T]) -> T {
    items[usize::arbitrary(g) % items.len()]
}
