use crate::{
    ast::Expression,
    error::ParseError,
    token::{Literal, Token, TokenKind},
};

type Result<T> = std::result::Result<T, ParseError>;

const EQUALITY: &[TokenKind] = &[TokenKind::Eq, TokenKind::NotEq];
const RELATIONAL: &[TokenKind] = &[
    TokenKind::Lt,
    TokenKind::LtEq,
    TokenKind::Gt,
    TokenKind::GtEq,
];
const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[TokenKind::Asterisk, TokenKind::Slash, TokenKind::Percent];

/// Deepest nesting of groupings, prefix operators, calls and member access
/// accepted in one expression.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent parser over a scanned token sequence.
///
/// Precedence, lowest first: `||`, `&&`, prefix `!`, `== !=`, `< <= > >=`,
/// `+ -`, `* / %`, `**`, prefix `-`, then calls and member access.
/// All binary operators are left-associative, `**` included.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// `tokens` is expected to end with `Eof`, as produced by the lexer.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|token| token.is(TokenKind::Eof)) {
            let end = tokens
                .last()
                .map_or(0, |token| token.position + token.lexeme.chars().count());
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Expression> {
        self.position = 0;
        self.depth = 0;
        let expression = self.parse_or()?;
        if !self.cur_token().is(TokenKind::Eof) {
            return Err(self.error("Expect end of expression."));
        }
        tracing::trace!(%expression, "parsed expression");
        Ok(expression)
    }

    fn cur_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> Token {
        self.tokens[self.position - 1].clone()
    }

    fn next_token(&mut self) -> &mut Self {
        if !self.cur_token().is(TokenKind::Eof) {
            self.position += 1;
        }
        self
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.cur_token().is(kind)
    }

    /// Consumes the current token if it is one of `kinds`.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.cur_token().kind) {
            self.next_token();
            Some(self.previous())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            self.next_token();
            Ok(self.previous())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::new(self.cur_token().clone(), message)
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("Expression nested too deeply."));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.descend()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Folds `next (op next)*` into left-nested binary nodes.
    fn parse_binary(
        &mut self,
        operators: &[TokenKind],
        next: fn(&mut Self) -> Result<Expression>,
    ) -> Result<Expression> {
        let mut left = next(self)?;
        while let Some(operator) = self.match_any(operators) {
            let right = next(self)?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expression> {
        self.parse_binary(&[TokenKind::Or], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        self.parse_binary(&[TokenKind::And], Self::parse_not)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        match self.match_any(&[TokenKind::Bang]) {
            Some(operator) => Ok(Expression::Unary {
                operator,
                right: Box::new(self.nested(Self::parse_not)?),
            }),
            None => self.parse_equality(),
        }
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        self.parse_binary(EQUALITY, Self::parse_relational)
    }

    fn parse_relational(&mut self) -> Result<Expression> {
        self.parse_binary(RELATIONAL, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        self.parse_binary(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        self.parse_binary(MULTIPLICATIVE, Self::parse_power)
    }

    fn parse_power(&mut self) -> Result<Expression> {
        self.parse_binary(&[TokenKind::Power], Self::parse_negation)
    }

    fn parse_negation(&mut self) -> Result<Expression> {
        match self.match_any(&[TokenKind::Minus]) {
            Some(operator) => Ok(Expression::Unary {
                operator,
                right: Box::new(self.nested(Self::parse_negation)?),
            }),
            None => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expression> {
        let depth = self.depth;
        let mut expression = self.parse_primary()?;
        loop {
            // every call or member step wraps the expression built so far
            if self.check(TokenKind::Lparen) || self.check(TokenKind::Period) {
                self.descend()?;
            }
            if self.match_any(&[TokenKind::Lparen]).is_some() {
                expression = self.parse_call_expression(expression)?;
            } else if self.match_any(&[TokenKind::Period]).is_some() {
                let name = self.expect(TokenKind::Ident, "Expect property name after '.'.")?;
                expression = Expression::member(expression, name.lexeme);
            } else {
                self.depth = depth;
                return Ok(expression);
            }
        }
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Result<Expression> {
        let arguments = self.nested(Self::parse_call_arguments)?;
        Ok(Expression::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut arguments: Vec<Expression> = Vec::new();

        if !self.check(TokenKind::Rparen) {
            arguments.push(self.parse_or()?);
            while self.match_any(&[TokenKind::Comma]).is_some() {
                arguments.push(self.parse_or()?);
            }
        }

        self.expect(TokenKind::Rparen, "Expect ')' after arguments.")?;

        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.cur_token().clone();
        let expression = match token.kind {
            TokenKind::True => Expression::BooleanLiteral(true),
            TokenKind::False => Expression::BooleanLiteral(false),
            TokenKind::Nil => Expression::NilLiteral,
            TokenKind::Integer => match token.literal {
                Some(Literal::Integer(value)) => Expression::IntegerLiteral(value),
                _ => return Err(self.error("Expect integer literal value.")),
            },
            TokenKind::Float => match token.literal {
                Some(Literal::Float(value)) => Expression::FloatLiteral(value),
                _ => return Err(self.error("Expect float literal value.")),
            },
            TokenKind::String => match token.literal {
                Some(Literal::String(value)) => Expression::StringLiteral(value),
                _ => return Err(self.error("Expect string literal value.")),
            },
            TokenKind::Ident => Expression::identifier(token.lexeme),
            TokenKind::Lparen => return self.parse_grouped_expression(),
            _ => return Err(self.error("Expect expression.")),
        };
        self.next_token();
        Ok(expression)
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        let expression = self.nested(|parser| {
            parser.next_token();
            parser.parse_or()
        })?;
        self.expect(TokenKind::Rparen, "Expect ')' after expression.")?;
        Ok(Expression::Grouping(Box::new(expression)))
    }
}
