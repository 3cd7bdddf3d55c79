use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    error::ScanError,
    token::{Literal, Token, TokenKind},
};

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = HashMap::from([
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("nil", TokenKind::Nil),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Bang),
    ]);
}

pub struct Lexer {
    chars: Vec<char>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            start: 0,
            current: 0,
        }
    }

    /// Scans the whole input. The returned sequence always ends with a single
    /// `Eof` token positioned at the end of the input.
    pub fn scan(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }
        tracing::trace!(count = tokens.len(), "scanned tokens");
        Ok(tokens)
    }

    /// Returns the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        loop {
            while self.peek().is_some_and(|char| char.is_whitespace()) {
                self.current += 1;
            }

            self.start = self.current;

            let Some(char) = self.read_char() else {
                return Ok(Token::new(TokenKind::Eof, "", self.chars.len()));
            };

            let kind = match char {
                '(' => TokenKind::Lparen,
                ')' => TokenKind::Rparen,
                '[' => TokenKind::Lbracket,
                ']' => TokenKind::Rbracket,
                '{' => TokenKind::Lbrace,
                '}' => TokenKind::Rbrace,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Period,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' if self.match_char('*') => TokenKind::Power,
                '*' => TokenKind::Asterisk,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '!' if self.match_char('=') => TokenKind::NotEq,
                '!' => TokenKind::Bang,
                '=' if self.match_char('=') => TokenKind::Eq,
                // a lone '=' produces no token
                '=' => continue,
                '<' if self.match_char('=') => TokenKind::LtEq,
                '<' => TokenKind::Lt,
                '>' if self.match_char('=') => TokenKind::GtEq,
                '>' => TokenKind::Gt,
                '&' if self.match_char('&') => TokenKind::And,
                '|' if self.match_char('|') => TokenKind::Or,
                '&' | '|' => continue,
                '"' | '\'' => return self.read_string(char),
                _ if char.is_ascii_digit() => return self.read_number(),
                _ if char.is_ascii_alphabetic() || char == '_' => {
                    return Ok(self.read_identifier())
                }
                _ => {
                    return Err(ScanError::UnexpectedCharacter {
                        character: char,
                        position: self.start,
                    })
                }
            };

            return Ok(self.make_token(kind));
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let char = self.chars.get(self.current).copied();
        if char.is_some() {
            self.current += 1;
        }
        char
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn read_while(&mut self, condition: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&condition) {
            self.current += 1;
        }
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.start)
    }

    fn read_string(&mut self, terminator: char) -> Result<Token, ScanError> {
        // a terminator directly preceded by a backslash does not close the string
        while self
            .peek()
            .is_some_and(|char| char != terminator || self.chars[self.current - 1] == '\\')
        {
            self.current += 1;
        }

        if self.read_char().is_none() {
            return Err(ScanError::UnterminatedString {
                position: self.start,
            });
        }

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        Ok(self
            .make_token(TokenKind::String)
            .with_literal(Literal::String(value)))
    }

    fn read_number(&mut self) -> Result<Token, ScanError> {
        self.read_while(|char| char.is_ascii_digit());

        let is_float = self.match_char('.');
        if is_float {
            self.read_while(|char| char.is_ascii_digit());
        }

        let lexeme = self.lexeme();
        let invalid = || ScanError::InvalidNumber {
            lexeme: lexeme.clone(),
            position: self.start,
        };

        let token = if is_float {
            let value = lexeme.parse::<f64>().map_err(|_| invalid())?;
            self.make_token(TokenKind::Float)
                .with_literal(Literal::Float(value))
        } else {
            let value = lexeme.parse::<i64>().map_err(|_| invalid())?;
            self.make_token(TokenKind::Integer)
                .with_literal(Literal::Integer(value))
        };
        Ok(token)
    }

    fn read_identifier(&mut self) -> Token {
        self.read_while(|char| char.is_ascii_alphanumeric() || char == '_');
        let lexeme = self.lexeme();
        let kind = KEYWORDS
            .get(lexeme.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.make_token(kind)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .scan()
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lexer() {
        let input = r#"
            max(x + y, 5, 3 * x * y)
            a.b.c
            1 - 2 / 3 % 4 ** 5
            1 < 2 <= 3 > 4 >= 5
            a == b != c
            !a && b || c
            [ ] { }
            'foo' "bar" 12 3.5
            true FALSE Nil and OR not
        "#;

        let expected = vec![
            TokenKind::Ident,
            TokenKind::Lparen,
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Integer,
            TokenKind::Comma,
            TokenKind::Integer,
            TokenKind::Asterisk,
            TokenKind::Ident,
            TokenKind::Asterisk,
            TokenKind::Ident,
            TokenKind::Rparen,
            TokenKind::Ident,
            TokenKind::Period,
            TokenKind::Ident,
            TokenKind::Period,
            TokenKind::Ident,
            TokenKind::Integer,
            TokenKind::Minus,
            TokenKind::Integer,
            TokenKind::Slash,
            TokenKind::Integer,
            TokenKind::Percent,
            TokenKind::Integer,
            TokenKind::Power,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Lt,
            TokenKind::Integer,
            TokenKind::LtEq,
            TokenKind::Integer,
            TokenKind::Gt,
            TokenKind::Integer,
            TokenKind::GtEq,
            TokenKind::Integer,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Ident,
            TokenKind::NotEq,
            TokenKind::Ident,
            TokenKind::Bang,
            TokenKind::Ident,
            TokenKind::And,
            TokenKind::Ident,
            TokenKind::Or,
            TokenKind::Ident,
            TokenKind::Lbracket,
            TokenKind::Rbracket,
            TokenKind::Lbrace,
            TokenKind::Rbrace,
            TokenKind::String,
            TokenKind::String,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Nil,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Bang,
            TokenKind::Eof,
        ];

        assert_eq!(kinds(input), expected);
    }

    #[test]
    fn test_token_positions_and_lexemes() {
        let tokens = Lexer::new("ab + 12.5").scan().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Ident, "ab", 0),
                Token::new(TokenKind::Plus, "+", 3),
                Token::new(TokenKind::Float, "12.5", 5).with_literal(Literal::Float(12.5)),
                Token::new(TokenKind::Eof, "", 9),
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tests = vec![
            ("42", Literal::Integer(42)),
            ("0.25", Literal::Float(0.25)),
            ("7.", Literal::Float(7.0)),
            ("'single'", Literal::String("single".to_string())),
            (r#""double""#, Literal::String("double".to_string())),
            (r#""it\"s""#, Literal::String(r#"it\"s"#.to_string())),
            ("''", Literal::String(String::new())),
        ];

        for (input, expected) in tests {
            let tokens = Lexer::new(input).scan().unwrap();
            assert_eq!(tokens[0].literal, Some(expected), "input: {input}");
            assert_eq!(tokens.len(), 2);
        }
    }

    #[test]
    fn test_dropped_characters() {
        assert_eq!(
            kinds("a = b"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a & b | c"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_eof_position_counts_characters() {
        let tokens = Lexer::new("'ü' ").scan().unwrap();
        assert_eq!(tokens.last().unwrap().position, 4);
    }

    #[test]
    fn test_scan_errors() {
        let tests = vec![
            (
                "1 + #",
                ScanError::UnexpectedCharacter {
                    character: '#',
                    position: 4,
                },
            ),
            ("x + 'abc", ScanError::UnterminatedString { position: 4 }),
            (r#""abc\""#, ScanError::UnterminatedString { position: 0 }),
            (
                "99999999999999999999",
                ScanError::InvalidNumber {
                    lexeme: "99999999999999999999".to_string(),
                    position: 0,
                },
            ),
        ];

        for (input, expected) in tests {
            let err = Lexer::new(input).scan().unwrap_err();
            assert_eq!(err, expected, "input: {input}");
        }
    }

    #[test]
    fn test_next_token_repeats_eof() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    proptest! {
        #[test]
        fn scanning_is_deterministic(input in "[a-z0-9 +*/%<>=!().,&|'-]{0,40}") {
            let first = Lexer::new(&input).scan();
            let second = Lexer::new(&input).scan();
            prop_assert_eq!(first, second);
        }
    }
}
