use crate::error::{DifferintError, Result};
use crate::sampling::{FunctionSource, Grid, SampledFunction};
use crate::traits::FractionalSystem;
use std::cell::RefCell;
use std::collections::HashMap;

/// OpCodes for the stack-based virtual machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpCode {
    /// Pushes a constant onto the stack.
    LoadConst(f64),
    /// Pushes the value of a variable (by index) onto the stack.
    LoadVar(usize),
    /// Pushes the value of a parameter (by index) onto the stack.
    LoadParam(usize),
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
    /// Pops top two values (b, a), pushes (a ^ b).
    Pow,
    /// Pops top value (a), pushes -a.
    Neg,
    /// Pops top value (a), pushes the named function of a.
    Call(Function),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
            Self::Exp => value.exp(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
            Self::Abs => value.abs(),
        }
    }
}

/// A compiled sequence of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bytecode {
    pub ops: Vec<OpCode>,
}

/// Stack-based virtual machine for evaluating compiled expressions.
///
/// The VM is stateless; `execute` takes the bytecode, the variable and
/// parameter values, and a scratch stack that is cleared on entry.
pub struct VM;

impl VM {
    pub fn execute(bytecode: &Bytecode, vars: &[f64], params: &[f64], stack: &mut Vec<f64>) -> f64 {
        stack.clear();

        for op in &bytecode.ops {
            match *op {
                OpCode::LoadConst(val) => stack.push(val),
                OpCode::LoadVar(idx) => stack.push(vars[idx]),
                OpCode::LoadParam(idx) => stack.push(params[idx]),
                OpCode::Neg => {
                    let a = stack.pop().unwrap_or(f64::NAN);
                    stack.push(-a);
                }
                OpCode::Call(function) => {
                    let a = stack.pop().unwrap_or(f64::NAN);
                    stack.push(function.apply(a));
                }
                binary => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    let a = stack.pop().unwrap_or(f64::NAN);
                    stack.push(match binary {
                        OpCode::Add => a + b,
                        OpCode::Sub => a - b,
                        OpCode::Mul => a * b,
                        OpCode::Div => a / b,
                        _ => a.powf(b),
                    });
                }
            }
        }

        // Compiled bytecode always leaves exactly one value.
        stack.pop().unwrap_or(f64::NAN)
    }
}

// --- AST & Parser ---

/// Abstract syntax tree of a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(Box<Expr>, char, Box<Expr>),
    Neg(Box<Expr>),
    Call(String, Box<Expr>),
}

/// Compiles an [`Expr`] into [`Bytecode`], resolving names to indices.
pub struct Compiler {
    pub var_map: HashMap<String, usize>,
    pub param_map: HashMap<String, usize>,
}

impl Compiler {
    pub fn new(var_names: &[String], param_names: &[String]) -> Self {
        let var_map = var_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let param_map = param_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { var_map, param_map }
    }

    pub fn compile(&self, expr: &Expr) -> Result<Bytecode> {
        let mut ops = Vec::new();
        self.compile_recursive(expr, &mut ops)?;
        Ok(Bytecode { ops })
    }

    fn compile_recursive(&self, expr: &Expr, ops: &mut Vec<OpCode>) -> Result<()> {
        match expr {
            Expr::Number(n) => ops.push(OpCode::LoadConst(*n)),
            Expr::Variable(name) => {
                if let Some(&idx) = self.var_map.get(name) {
                    ops.push(OpCode::LoadVar(idx));
                } else if let Some(&idx) = self.param_map.get(name) {
                    ops.push(OpCode::LoadParam(idx));
                } else if let Some(value) = named_constant(name) {
                    ops.push(OpCode::LoadConst(value));
                } else {
                    return Err(DifferintError::Expression(format!(
                        "unknown variable or parameter: {name}"
                    )));
                }
            }
            Expr::Binary(left, op, right) => {
                self.compile_recursive(left, ops)?;
                self.compile_recursive(right, ops)?;
                ops.push(match op {
                    '+' => OpCode::Add,
                    '-' => OpCode::Sub,
                    '*' => OpCode::Mul,
                    '/' => OpCode::Div,
                    '^' => OpCode::Pow,
                    _ => {
                        return Err(DifferintError::Expression(format!(
                            "unknown binary operator: {op}"
                        )))
                    }
                });
            }
            Expr::Neg(operand) => {
                self.compile_recursive(operand, ops)?;
                ops.push(OpCode::Neg);
            }
            Expr::Call(name, arg) => {
                let function = Function::lookup(name).ok_or_else(|| {
                    DifferintError::Expression(format!("unknown function: {name}"))
                })?;
                self.compile_recursive(arg, ops)?;
                ops.push(OpCode::Call(function));
            }
        }
        Ok(())
    }
}

fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Parses a string expression into an AST.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(DifferintError::Expression(format!(
            "unexpected trailing input in \"{input}\""
        )));
    }
    Ok(expr)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut num_str = String::new();
            while let Some(&d) = chars.peek() {
                let exponent_sign =
                    (d == '+' || d == '-') && num_str.ends_with(|p: char| p == 'e' || p == 'E');
                if d.is_ascii_digit() || d == '.' || d == 'e' || d == 'E' || exponent_sign {
                    num_str.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = num_str
                .parse()
                .map_err(|_| DifferintError::Expression(format!("invalid number: {num_str}")))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Identifier(ident));
        } else {
            tokens.push(match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '^' => Token::Caret,
                '(' => Token::LParen,
                ')' => Token::RParen,
                _ => {
                    return Err(DifferintError::Expression(format!(
                        "unexpected character: {c}"
                    )))
                }
            });
            chars.next();
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_rparen(&mut self) -> Result<()> {
        match self.consume() {
            Some(Token::RParen) => Ok(()),
            _ => Err(DifferintError::Expression("expected ')'".to_string())),
        }
    }

    /// expression := term (('+' | '-') term)*
    fn parse_expression(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => '+',
                Some(Token::Minus) => '-',
                _ => break,
            };
            self.consume();
            let right = self.parse_term()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    /// term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => '*',
                Some(Token::Slash) => '/',
                _ => break,
            };
            self.consume();
            let right = self.parse_unary()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    /// unary := '-' unary | power
    fn parse_unary(&mut self) -> Result<Expr> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let operand = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.parse_power()
    }

    /// power := primary ('^' unary)?   (right associative)
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.consume();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(Box::new(base), '^', Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.consume();
                    let arg = self.parse_expression()?;
                    self.expect_rparen()?;
                    Ok(Expr::Call(name, Box::new(arg)))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            Some(token) => Err(DifferintError::Expression(format!(
                "unexpected token: {token:?}"
            ))),
            None => Err(DifferintError::Expression(
                "unexpected end of expression".to_string(),
            )),
        }
    }
}

fn compile_source(source: &str, var_names: &[&str], param_names: &[String]) -> Result<Bytecode> {
    let vars: Vec<String> = var_names.iter().map(|v| v.to_string()).collect();
    let expr = parse(source)?;
    Compiler::new(&vars, param_names).compile(&expr)
}

// --- Compiled functions ---

/// A compiled scalar function f(x).
pub struct ExpressionFunction {
    code: Bytecode,
    params: Vec<f64>,
    stack: RefCell<Vec<f64>>,
}

impl ExpressionFunction {
    pub fn compile(source: &str, params: Vec<f64>, param_names: &[String]) -> Result<Self> {
        check_params(&params, param_names)?;
        Ok(Self {
            code: compile_source(source, &["x"], param_names)?,
            params,
            stack: RefCell::new(Vec::with_capacity(32)),
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let mut stack = self.stack.borrow_mut();
        VM::execute(&self.code, &[x], &self.params, &mut stack)
    }
}

impl FunctionSource for ExpressionFunction {
    fn sample(&self, grid: &Grid) -> Result<SampledFunction> {
        (|x: f64| self.eval(x)).sample(grid)
    }
}

/// A compiled right-hand side f(x, y) of a fractional differential equation.
///
/// The VM stack lives in a `RefCell`, which makes the system `!Sync`.
pub struct ExpressionSystem {
    code: Bytecode,
    params: Vec<f64>,
    stack: RefCell<Vec<f64>>,
}

impl ExpressionSystem {
    pub fn compile(source: &str, params: Vec<f64>, param_names: &[String]) -> Result<Self> {
        check_params(&params, param_names)?;
        Ok(Self {
            code: compile_source(source, &["x", "y"], param_names)?,
            params,
            stack: RefCell::new(Vec::with_capacity(32)),
        })
    }
}

impl FractionalSystem for ExpressionSystem {
    fn rhs(&self, x: f64, y: f64) -> f64 {
        let mut stack = self.stack.borrow_mut();
        VM::execute(&self.code, &[x, y], &self.params, &mut stack)
    }
}

fn check_params(params: &[f64], param_names: &[String]) -> Result<()> {
    if params.len() != param_names.len() {
        return Err(DifferintError::ShapeMismatch {
            expected: param_names.len(),
            got: params.len(),
        });
    }
    Ok(())
}
