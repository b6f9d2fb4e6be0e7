//! Literal scanning for the ec lexer
//!
//! Numbers, string literals and character literals.

use crate::lexer::{is_identifier_char, Lexer, TokenType};

fn malformed(lexeme: String, reason: &str) -> TokenType {
    TokenType::Malformed {
        lexeme,
        reason: reason.to_string(),
    }
}

impl Lexer {
    fn take_digits(&mut self, lexeme: &mut String, radix: u32) -> usize {
        let mut count = 0;
        while let Some(ch) = self.next_if(|c| c.is_digit(radix)) {
            lexeme.push(ch);
            count += 1;
        }
        count
    }

    /// Swallow whatever identifier characters glue onto a number so the
    /// whole run is reported as one bad literal
    fn trailing_garbage(&mut self, lexeme: &mut String) -> bool {
        let mut found = false;
        while let Some(ch) = self.next_if(|c| is_identifier_char(c) || c == '.') {
            lexeme.push(ch);
            found = true;
        }
        found
    }

    /// Scan a numeric literal whose first character (a digit or `.`) has
    /// already been read.
    ///
    /// Floating if it has a decimal point, an exponent or an `f` suffix;
    /// integer otherwise. `0x` introduces a hexadecimal integer.
    pub(crate) fn lex_number(&mut self, first: char) -> TokenType {
        let mut lexeme = String::new();
        lexeme.push(first);

        if first == '0' {
            if let Some(x) = self.next_if(|c| c == 'x' || c == 'X') {
                lexeme.push(x);
                return self.lex_hex(lexeme);
            }
        }

        let mut is_float = first == '.';
        self.take_digits(&mut lexeme, 10);

        if !is_float && self.next_if(|c| c == '.').is_some() {
            lexeme.push('.');
            is_float = true;
            self.take_digits(&mut lexeme, 10);
        }

        if let Some(marker) = self.next_if(|c| c == 'e' || c == 'E') {
            let sign = self.next_if(|c| c == '+' || c == '-');
            if let Some(digit) = self.next_if(|c| c.is_ascii_digit()) {
                lexeme.push(marker);
                lexeme.extend(sign);
                lexeme.push(digit);
                self.take_digits(&mut lexeme, 10);
                is_float = true;
            } else {
                // not an exponent after all
                if sign.is_some() {
                    self.stream.unget_char();
                }
                self.stream.unget_char();
            }
        }

        let digits_end = lexeme.len();
        while let Some(suffix) = self.next_if(|c| matches!(c, 'f' | 'F' | 'u' | 'U' | 'l' | 'L')) {
            lexeme.push(suffix);
        }
        let float_suffix = lexeme[digits_end..].contains(['f', 'F']);
        let unsigned_suffix = lexeme[digits_end..].contains(['u', 'U']);
        is_float |= float_suffix;

        if self.trailing_garbage(&mut lexeme) {
            return malformed(lexeme, "malformed number");
        }

        let digits = lexeme[..digits_end].to_string();
        if is_float {
            if unsigned_suffix {
                return malformed(lexeme, "malformed number");
            }
            let mut text = digits;
            if text.starts_with('.') {
                text.insert(0, '0');
            }
            if text.ends_with('.') {
                text.push('0');
            }
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => TokenType::FloatLiteral(value),
                Ok(_) => malformed(lexeme, "floating literal out of range"),
                Err(_) => malformed(lexeme, "malformed number"),
            }
        } else {
            match digits.parse::<i64>() {
                Ok(value) => TokenType::IntLiteral(value),
                Err(_) => malformed(lexeme, "integer literal out of range"),
            }
        }
    }

    fn lex_hex(&mut self, mut lexeme: String) -> TokenType {
        let start = lexeme.len();
        if self.take_digits(&mut lexeme, 16) == 0 {
            self.trailing_garbage(&mut lexeme);
            return malformed(lexeme, "hexadecimal literal has no digits");
        }
        let digits_end = lexeme.len();
        while let Some(suffix) = self.next_if(|c| matches!(c, 'u' | 'U' | 'l' | 'L')) {
            lexeme.push(suffix);
        }
        if self.trailing_garbage(&mut lexeme) {
            return malformed(lexeme, "malformed number");
        }

        let parsed = i64::from_str_radix(&lexeme[start..digits_end], 16);
        match parsed {
            Ok(value) => TokenType::IntLiteral(value),
            Err(_) => malformed(lexeme, "integer literal out of range"),
        }
    }

    /// Character following a backslash; `None` at end of input
    fn escape(&mut self) -> Option<char> {
        let ch = self.stream.next_char()?;
        Some(match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other,
        })
    }

    /// Scan a string literal; the opening quote is already read
    pub(crate) fn lex_string(&mut self) -> TokenType {
        let mut value = String::new();
        loop {
            match self.stream.next_char() {
                Some('"') => return TokenType::StringLiteral(value),
                Some('\\') => match self.escape() {
                    Some(ch) => value.push(ch),
                    None => break,
                },
                Some(ch) => value.push(ch),
                None => break,
            }
        }
        malformed(format!("\"{}", value), "unterminated string literal")
    }

    /// Scan a character literal; the opening quote is already read
    pub(crate) fn lex_char(&mut self) -> TokenType {
        let value = match self.stream.next_char() {
            Some('\'') => return malformed("''".to_string(), "empty character literal"),
            Some('\\') => self.escape(),
            Some('\n') | None => None,
            Some(ch) => Some(ch),
        };

        match value {
            Some(ch) if self.next_if(|c| c == '\'').is_some() => TokenType::CharLiteral(ch),
            Some(ch) => malformed(format!("'{}", ch), "unterminated character literal"),
            None => malformed("'".to_string(), "unterminated character literal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{Lexer, TokenType};

    fn single(input: &str) -> TokenType {
        Lexer::new(input).next_token().token_type
    }

    fn float(input: &str) -> f64 {
        match single(input) {
            TokenType::FloatLiteral(value) => value,
            other => panic!("Expected float literal for {input}, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(single("123"), TokenType::IntLiteral(123));
        assert_eq!(single("0"), TokenType::IntLiteral(0));
        assert_eq!(single("234230212321L"), TokenType::IntLiteral(234230212321));
        assert_eq!(single("42u"), TokenType::IntLiteral(42));
        assert_eq!(single("0x1F"), TokenType::IntLiteral(31));
        assert_eq!(single("0XffUL"), TokenType::IntLiteral(255));
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(float("3.14"), 3.14);
        assert_eq!(float(".124"), 0.124);
        assert_eq!(float("2.34e+5"), 234000.0);
        assert_eq!(float("1.33e-2"), 0.0133);
        assert_eq!(float(".0"), 0.0);
        assert_eq!(float("0."), 0.0);
        assert_eq!(float("3e3"), 3000.0);
        assert_eq!(float("3e3f"), 3000.0);
        assert_eq!(float("2f"), 2.0);
    }

    #[test]
    fn test_number_spellings_in_sequence() {
        let tokens = Lexer::new("123 3.14 .124 2.34e+5 1.33e-2 0. 3e3").tokenize();
        let classes: Vec<bool> = tokens
            .iter()
            .filter_map(|t| match t.token_type {
                TokenType::IntLiteral(_) => Some(false),
                TokenType::FloatLiteral(_) => Some(true),
                _ => None,
            })
            .collect();
        assert_eq!(classes, vec![false, true, true, true, true, true, true]);
    }

    #[test]
    fn test_exponent_marker_without_digits_is_retracted() {
        let tokens = Lexer::new("1+e").tokenize();
        assert_eq!(tokens[0].token_type, TokenType::IntLiteral(1));
        assert_eq!(tokens[1].token_type, TokenType::Plus);

        // The retracted 'e' is still glued onto the digits
        let tokens = Lexer::new("1e+").tokenize();
        match &tokens[0].token_type {
            TokenType::Malformed { lexeme, reason } => {
                assert_eq!(lexeme, "1e");
                assert_eq!(reason, "malformed number");
            }
            other => panic!("Expected malformed token, got {other:?}"),
        }
        assert_eq!(tokens[1].token_type, TokenType::Plus);
        assert_eq!(tokens[2].token_type, TokenType::EndOfFile);
    }

    #[test]
    fn test_float_out_of_range() {
        match single("1e999") {
            TokenType::Malformed { lexeme, reason } => {
                assert_eq!(lexeme, "1e999");
                assert_eq!(reason, "floating literal out of range");
            }
            other => panic!("Expected malformed token, got {other:?}"),
        }
        assert_eq!(float("1e308"), 1e308);
    }

    #[test]
    fn test_number_followed_by_operator() {
        let tokens = Lexer::new("1+2").tokenize();
        assert_eq!(tokens[0].token_type, TokenType::IntLiteral(1));
        assert_eq!(tokens[1].token_type, TokenType::Plus);
        assert_eq!(tokens[2].token_type, TokenType::IntLiteral(2));
    }

    #[test]
    fn test_malformed_numbers() {
        for input in ["12abc", "0x", "0xZZ", "1.2.3", "99999999999999999999"] {
            assert!(
                matches!(single(input), TokenType::Malformed { .. }),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(single("\"hello\""), TokenType::StringLiteral("hello".to_string()));
        assert_eq!(
            single(r#""a\n\"b\"""#),
            TokenType::StringLiteral("a\n\"b\"".to_string())
        );
        match single("\"never closed") {
            TokenType::Malformed { reason, .. } => assert_eq!(reason, "unterminated string literal"),
            other => panic!("Expected malformed token, got {other:?}"),
        }
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(single("'c'"), TokenType::CharLiteral('c'));
        assert_eq!(single(r"'\n'"), TokenType::CharLiteral('\n'));
        assert!(matches!(single("''"), TokenType::Malformed { .. }));
        assert!(matches!(single("'ab'"), TokenType::Malformed { .. }));
    }
}
