//! User-supplied custom animations.
//!
//! The custom variant accepts source text, but instead of executing it as
//! native code it is compiled by a small arithmetic expression evaluator:
//! an expression over `x`, `y` (pixel coordinates), `w`, `h` (surface
//! size) and `t` (animation time) producing a scalar field, rendered the
//! same way the plasma variant renders its field. Compile failures are
//! ordinary errors contained at the registry boundary.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

/// Why a custom expression failed to compile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token \"{0}\"")]
    UnexpectedToken(String),
    #[error("unknown name \"{0}\"")]
    UnknownName(String),
    #[error("{name}() takes {expected} argument(s), got {got}")]
    WrongArity {
        name: &'static str,
        expected: usize,
        got: usize,
    },
}

/// A compiled scalar-field expression.
#[derive(Debug, Clone)]
pub struct Expr {
    ops: Vec<Op>,
    depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Const(f32),
    Var(Var),
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Fn1(Fn1),
    Fn2(Fn2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Var {
    X,
    Y,
    W,
    H,
    T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fn1 {
    Sin,
    Cos,
    Sqrt,
    Abs,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fn2 {
    Min,
    Max,
}

impl Expr {
    /// Compile expression source. Never panics; every malformed input is
    /// a [`CompileError`].
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser { tokens, pos: 0 };
        let mut ops = Vec::new();
        parser.expression(&mut ops)?;
        if parser.pos != parser.tokens.len() {
            return Err(CompileError::UnexpectedToken(parser.describe_current()));
        }
        let depth = stack_depth(&ops);
        Ok(Self { ops, depth })
    }

    /// Evaluate at one sample point. Non-finite results collapse to zero
    /// so a division by zero cannot poison the raster.
    pub fn eval(&self, x: f32, y: f32, w: f32, h: f32, t: f32) -> f32 {
        let mut stack: Vec<f32> = Vec::with_capacity(self.depth);
        for op in &self.ops {
            match op {
                Op::Const(v) => stack.push(*v),
                Op::Var(var) => stack.push(match var {
                    Var::X => x,
                    Var::Y => y,
                    Var::W => w,
                    Var::H => h,
                    Var::T => t,
                }),
                Op::Neg => {
                    let a = stack.pop().unwrap_or(0.0);
                    stack.push(-a);
                }
                Op::Add | Op::Sub | Op::Mul | Op::Div => {
                    let b = stack.pop().unwrap_or(0.0);
                    let a = stack.pop().unwrap_or(0.0);
                    stack.push(match op {
                        Op::Add => a + b,
                        Op::Sub => a - b,
                        Op::Mul => a * b,
                        _ => a / b,
                    });
                }
                Op::Fn1(f) => {
                    let a = stack.pop().unwrap_or(0.0);
                    stack.push(match f {
                        Fn1::Sin => a.sin(),
                        Fn1::Cos => a.cos(),
                        Fn1::Sqrt => a.abs().sqrt(),
                        Fn1::Abs => a.abs(),
                    });
                }
                Op::Fn2(f) => {
                    let b = stack.pop().unwrap_or(0.0);
                    let a = stack.pop().unwrap_or(0.0);
                    stack.push(match f {
                        Fn2::Min => a.min(b),
                        Fn2::Max => a.max(b),
                    });
                }
            }
        }
        let out = stack.pop().unwrap_or(0.0);
        if out.is_finite() { out } else { 0.0 }
    }
}

fn stack_depth(ops: &[Op]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for op in ops {
        match op {
            Op::Const(_) | Op::Var(_) => depth += 1,
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Fn2(_) => depth = depth.saturating_sub(1),
            Op::Neg | Op::Fn1(_) => {}
        }
        max = max.max(depth);
    }
    max
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f32),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '0'..='9' | '.' => {
                let mut text = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        text.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f32 = text
                    .parse()
                    .map_err(|_| CompileError::UnexpectedToken(text.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => return Err(CompileError::UnexpectedChar(other)),
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

    fn describe_current(&self) -> String {
        match self.peek() {
            Some(Token::Number(v)) => v.to_string(),
            Some(Token::Ident(name)) => name.clone(),
            Some(Token::Plus) => "+".into(),
            Some(Token::Minus) => "-".into(),
            Some(Token::Star) => "*".into(),
            Some(Token::Slash) => "/".into(),
            Some(Token::LParen) => "(".into(),
            Some(Token::RParen) => ")".into(),
            Some(Token::Comma) => ",".into(),
            None => "end".into(),
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), CompileError> {
        if self.peek() == Some(&token) {
            self.pos += 1;
            Ok(())
        } else if self.peek().is_none() {
            Err(CompileError::UnexpectedEnd)
        } else {
            Err(CompileError::UnexpectedToken(self.describe_current()))
        }
    }

    fn expression(&mut self, out: &mut Vec<Op>) -> Result<(), CompileError> {
        self.term(out)?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => Op::Add,
                Token::Minus => Op::Sub,
                _ => break,
            };
            self.pos += 1;
            self.term(out)?;
            out.push(op);
        }
        Ok(())
    }

    fn term(&mut self, out: &mut Vec<Op>) -> Result<(), CompileError> {
        self.factor(out)?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => Op::Mul,
                Token::Slash => Op::Div,
                _ => break,
            };
            self.pos += 1;
            self.factor(out)?;
            out.push(op);
        }
        Ok(())
    }

    fn factor(&mut self, out: &mut Vec<Op>) -> Result<(), CompileError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            self.factor(out)?;
            out.push(Op::Neg);
            return Ok(());
        }
        match self.peek().cloned() {
            Some(Token::Number(value)) => {
                self.pos += 1;
                out.push(Op::Const(value));
                Ok(())
            }
            Some(Token::LParen) => {
                self.pos += 1;
                self.expression(out)?;
                self.expect(Token::RParen)
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                if self.peek() == Some(&Token::LParen) {
                    self.call(&name, out)
                } else {
                    let var = match name.as_str() {
                        "x" => Var::X,
                        "y" => Var::Y,
                        "w" => Var::W,
                        "h" => Var::H,
                        "t" => Var::T,
                        "pi" => {
                            out.push(Op::Const(std::f32::consts::PI));
                            return Ok(());
                        }
                        _ => return Err(CompileError::UnknownName(name)),
                    };
                    out.push(Op::Var(var));
                    Ok(())
                }
            }
            Some(_) => Err(CompileError::UnexpectedToken(self.describe_current())),
            None => Err(CompileError::UnexpectedEnd),
        }
    }

    fn call(&mut self, name: &str, out: &mut Vec<Op>) -> Result<(), CompileError> {
        let (op, expected): (Op, usize) = match name {
            "sin" => (Op::Fn1(Fn1::Sin), 1),
            "cos" => (Op::Fn1(Fn1::Cos), 1),
            "sqrt" => (Op::Fn1(Fn1::Sqrt), 1),
            "abs" => (Op::Fn1(Fn1::Abs), 1),
            "min" => (Op::Fn2(Fn2::Min), 2),
            "max" => (Op::Fn2(Fn2::Max), 2),
            _ => return Err(CompileError::UnknownName(name.into())),
        };
        self.expect(Token::LParen)?;
        let mut got = 0;
        loop {
            self.expression(out)?;
            got += 1;
            match self.peek() {
                Some(Token::Comma) => {
                    self.pos += 1;
                }
                Some(Token::RParen) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(CompileError::UnexpectedToken(self.describe_current())),
                None => return Err(CompileError::UnexpectedEnd),
            }
        }
        if got != expected {
            let name: &'static str = match op {
                Op::Fn1(Fn1::Sin) => "sin",
                Op::Fn1(Fn1::Cos) => "cos",
                Op::Fn1(Fn1::Sqrt) => "sqrt",
                Op::Fn1(Fn1::Abs) => "abs",
                Op::Fn2(Fn2::Min) => "min",
                _ => "max",
            };
            return Err(CompileError::WrongArity { name, expected, got });
        }
        out.push(op);
        Ok(())
    }
}

/// The `"custom"` variant: a compiled expression rendered as a raster
/// field, subsampled 2x2 like plasma.
pub struct CustomField {
    expr: Expr,
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl CustomField {
    /// Default color when the config leaves it empty.
    pub const DEFAULT_COLOR: &'static str = "#0073aa";

    /// Compile `config.custom_code` into a mounted field animation.
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Result<Self, CompileError> {
        let source = config.custom_code.as_deref().unwrap_or_default();
        Ok(Self {
            expr: Expr::compile(source)?,
            color: Rgba::parse(config.color_or(Self::DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
        })
    }
}

impl Animation for CustomField {
    fn update(&mut self) {
        self.time += 0.03 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let (w, h) = (self.width as f32, self.height as f32);
        let mut y = 0;
        while y < self.height {
            let mut x = 0;
            while x < self.width {
                let value = self.expr.eval(x as f32, y as f32, w, h, self.time);
                // Map through a sine so unbounded expressions still produce
                // a bounded, animating intensity.
                let intensity = (value.sin() + 1.0) / 2.0;
                let color = Rgba::new(
                    (self.color.r as f32 * intensity) as u8,
                    (self.color.g as f32 * intensity) as u8,
                    (self.color.b as f32 * intensity) as u8,
                    self.color.a * (intensity * 0.6 + 0.2),
                );
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    canvas.set_pixel(x + dx, y + dy, color);
                }
                x += 2;
            }
            y += 2;
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_eval() {
        let expr = Expr::compile("x + y * 2").unwrap();
        assert_eq!(expr.eval(1.0, 3.0, 0.0, 0.0, 0.0), 7.0);

        let expr = Expr::compile("sin(t) + sqrt(x * x + y * y) / 10").unwrap();
        assert!((expr.eval(3.0, 4.0, 0.0, 0.0, 0.0) - 0.5).abs() < 1e-6);

        let expr = Expr::compile("min(x, max(y, 2))").unwrap();
        assert_eq!(expr.eval(5.0, 1.0, 0.0, 0.0, 0.0), 2.0);

        let expr = Expr::compile("-(x - w)").unwrap();
        assert_eq!(expr.eval(2.0, 0.0, 10.0, 0.0, 0.0), 8.0);
    }

    #[test]
    fn test_compile_errors_do_not_panic() {
        assert!(Expr::compile("").is_err());
        assert!(Expr::compile("x +").is_err());
        assert!(Expr::compile("foo(x)").is_err());
        assert!(Expr::compile("q * 2").is_err());
        assert!(Expr::compile("sin(x, y)").is_err());
        assert!(Expr::compile("1 @ 2").is_err());
        assert!(Expr::compile("(x").is_err());
        assert!(Expr::compile("x y").is_err());
    }

    #[test]
    fn test_division_by_zero_is_contained() {
        let expr = Expr::compile("1 / x").unwrap();
        assert_eq!(expr.eval(0.0, 0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_custom_field_draws() {
        let config = AnimationConfig {
            variant: "custom".into(),
            speed: 1.0,
            color: "#0073aa".into(),
            custom_code: Some("x / 10 + t".into()),
        };
        let mut field = CustomField::new(&config, 16, 16).unwrap();
        let mut canvas = Canvas::new(16, 16);
        field.update();
        field.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}
