//! Recursive-descent parser over the token stream from [`crate::lexer`]

use std::mem::discriminant;

use crate::ast::{
    AssignOp, BinaryOp, Expr, FunctionDef, Item, Param, Program, Stmt, TypeName, UnaryOp,
};
use crate::error::{BaselineError, Result};
use crate::lexer::{Spanned, Token};

pub struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Spanned<'a>>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(mut self) -> Result<Program> {
        let mut items = vec![];

        while let Some(token) = self.current() {
            match token {
                Token::Def => items.push(Item::Function(self.parse_function()?)),
                Token::Newline(_) => self.advance(),
                _ => items.push(Item::Statement(self.parse_statement()?)),
            }
        }

        Ok(Program { items })
    }

    fn parse_function(&mut self) -> Result<FunctionDef> {
        self.consume(Token::Def, "'def'")?;
        let name = self.expect_ident()?;

        self.consume(Token::LParen, "'('")?;
        let mut params = vec![];
        while !matches!(self.current(), Some(Token::RParen)) {
            let name = self.expect_ident()?;
            self.consume(Token::Colon, "':'")?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });

            if matches!(self.current(), Some(Token::Comma)) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(Token::RParen, "')'")?;

        let return_type = if matches!(self.current(), Some(Token::Arrow)) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume(Token::Colon, "':'")?;
        let body = self.parse_block()?;

        Ok(FunctionDef {
            name,
            params,
            return_type,
            body,
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.consume(Token::Newline(0), "end of line")?;
        self.consume(Token::Indent, "indented block")?;

        let mut body = vec![];
        loop {
            match self.current() {
                Some(Token::Dedent) => {
                    self.advance();
                    break;
                }
                Some(Token::Newline(_)) => self.advance(),
                Some(_) => body.push(self.parse_statement()?),
                None => break,
            }
        }

        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        let stmt = match self.current() {
            Some(Token::If) => return self.parse_if(),
            Some(Token::While) => return self.parse_while(),
            Some(Token::Return) => {
                self.advance();
                if self.at_line_end() {
                    Stmt::Return(None)
                } else {
                    Stmt::Return(Some(self.parse_expression()?))
                }
            }
            Some(Token::Break) => {
                self.advance();
                Stmt::Break
            }
            Some(Token::Continue) => {
                self.advance();
                Stmt::Continue
            }
            Some(Token::Ident(name)) => {
                let name = name.to_string();
                match self.peek().and_then(assign_op) {
                    Some(op) => {
                        self.pos += 2;
                        Stmt::Assign {
                            target: name,
                            op,
                            value: self.parse_expression()?,
                        }
                    }
                    None if matches!(self.peek(), Some(Token::Colon)) => {
                        self.pos += 2;
                        let ty = self.parse_type()?;
                        self.consume(Token::Assign, "'='")?;
                        Stmt::Declare {
                            name,
                            ty,
                            value: self.parse_expression()?,
                        }
                    }
                    None => Stmt::Expr(self.parse_expression()?),
                }
            }
            _ => Stmt::Expr(self.parse_expression()?),
        };

        self.end_of_line()?;
        Ok(stmt)
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.consume(Token::If, "'if'")?;
        let mut branches = vec![self.parse_conditional_block()?];
        let mut else_body = vec![];

        loop {
            match self.current() {
                Some(Token::Elif) => {
                    self.advance();
                    branches.push(self.parse_conditional_block()?);
                }
                Some(Token::Else) => {
                    self.advance();
                    self.consume(Token::Colon, "':'")?;
                    else_body = self.parse_block()?;
                    break;
                }
                _ => break,
            }
        }

        Ok(Stmt::If {
            branches,
            else_body,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.consume(Token::While, "'while'")?;
        let (condition, body) = self.parse_conditional_block()?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_conditional_block(&mut self) -> Result<(Expr, Vec<Stmt>)> {
        let condition = self.parse_expression()?;
        self.consume(Token::Colon, "':'")?;
        let body = self.parse_block()?;
        Ok((condition, body))
    }

    fn parse_type(&mut self) -> Result<TypeName> {
        let ty = match self.current() {
            Some(Token::IntType) => TypeName::Int,
            Some(Token::FloatType) => TypeName::Float,
            Some(Token::StrType) => TypeName::Str,
            Some(Token::BoolType) => TypeName::Bool,
            _ => return Err(self.error("type name")),
        };
        self.advance();
        Ok(ty)
    }

    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while matches!(self.current(), Some(Token::Or)) {
            self.advance();
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;
        while matches!(self.current(), Some(Token::And)) {
            self.advance();
            let right = self.parse_not()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if matches!(self.current(), Some(Token::Not)) {
            self.advance();
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                Some(Token::Less) => BinaryOp::Less,
                Some(Token::Greater) => BinaryOp::Greater,
                Some(Token::LessEq) => BinaryOp::LessEq,
                Some(Token::GreaterEq) => BinaryOp::GreaterEq,
                Some(Token::In) => BinaryOp::In,
                _ => break,
            };

            self.advance();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };

            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if matches!(self.current(), Some(Token::Minus)) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_atom()?;

        loop {
            match self.current() {
                Some(Token::LParen) => {
                    self.advance();
                    let args = self.parse_sequence(Token::RParen, "')'")?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                Some(Token::Dot) => {
                    self.advance();
                    let name = self.expect_ident()?;
                    expr = Expr::Attribute {
                        value: Box::new(expr),
                        name,
                    };
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.consume(Token::RBracket, "']'")?;
                    expr = Expr::Index {
                        value: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let expr = match self.current() {
            Some(Token::Integer(value)) => Expr::Integer(*value),
            Some(Token::Float(value)) => Expr::Float(*value),
            Some(Token::Str(value)) => Expr::Str((*value).to_string()),
            Some(Token::True) => Expr::Bool(true),
            Some(Token::False) => Expr::Bool(false),
            Some(Token::NoneLiteral) => Expr::NoneLiteral,
            Some(Token::Ident(name)) => Expr::Name((*name).to_string()),
            // Builtins that double as keywords, e.g. `range(10)` or `int(x)`
            Some(Token::Range) => Expr::Name("range".to_string()),
            Some(Token::IntType) => Expr::Name("int".to_string()),
            Some(Token::FloatType) => Expr::Name("float".to_string()),
            Some(Token::StrType) => Expr::Name("str".to_string()),
            Some(Token::BoolType) => Expr::Name("bool".to_string()),
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_expression()?;
                self.consume(Token::RParen, "')'")?;
                return Ok(inner);
            }
            Some(Token::LBracket) => {
                self.advance();
                let elements = self.parse_sequence(Token::RBracket, "']'")?;
                return Ok(Expr::List(elements));
            }
            _ => return Err(self.error("expression")),
        };

        self.advance();
        Ok(expr)
    }

    /// Comma-separated expressions up to and including `close`
    fn parse_sequence(&mut self, close: Token<'static>, what: &str) -> Result<Vec<Expr>> {
        let mut elements = vec![];
        while !self.at(&close) {
            elements.push(self.parse_expression()?);
            if matches!(self.current(), Some(Token::Comma)) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(close, what)?;
        Ok(elements)
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos).map(|spanned| &spanned.token)
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + 1).map(|spanned| &spanned.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at(&self, expected: &Token<'_>) -> bool {
        self.current().map(discriminant) == Some(discriminant(expected))
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current(), None | Some(Token::Newline(_)))
    }

    fn consume(&mut self, expected: Token<'_>, what: &str) -> Result<()> {
        if self.at(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current() {
            Some(Token::Newline(_)) => {
                self.advance();
                Ok(())
            }
            None => Ok(()),
            Some(_) => Err(self.error("end of line")),
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.current() {
            Some(Token::Ident(name)) => {
                let name = (*name).to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    fn error(&self, expected: &str) -> BaselineError {
        match self.tokens.get(self.pos) {
            Some(spanned) => BaselineError::UnexpectedToken {
                position: spanned.span.start,
                expected: expected.to_string(),
                found: format!("{:?}", spanned.token),
            },
            None => BaselineError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }
}

fn assign_op(token: &Token<'_>) -> Option<AssignOp> {
    match token {
        Token::Assign => Some(AssignOp::Set),
        Token::PlusAssign => Some(AssignOp::Add),
        Token::MinusAssign => Some(AssignOp::Sub),
        Token::StarAssign => Some(AssignOp::Mul),
        Token::SlashAssign => Some(AssignOp::Div),
        Token::PercentAssign => Some(AssignOp::Mod),
        _ => None,
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
