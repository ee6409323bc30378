//! Tokenizer for exercise expressions.
//!
//! The four operator glyphs (`+`, `-`, `×`, `÷`) and parentheses are tokens of their own; every
//! other maximal run of non-whitespace characters is a single operand token. In particular `/`
//! and `'` never split a token, so `2'3/8` scans as one operand.

pub mod types;
pub use types::*;

use crate::utils::PeekIter;

/// Scans `input` into tokens, ending with an [EOF](TokenType::EOF) token. Scanning never fails;
/// whether an operand token is a valid number is decided by the parser.
pub fn scan<T: Into<String>>(input: T) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    scanner.scan();
    scanner.output
}

fn is_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '×' | '÷' | '(' | ')')
}

struct Scanner {
    input: PeekIter<(usize, char)>,
    /// Number of characters in the input.
    len: usize,
    output: Vec<Token>,
}

impl Scanner {
    fn new<T: Into<String>>(input: T) -> Scanner {
        let chars: Vec<(usize, char)> = input.into().chars().enumerate().collect();
        Scanner {
            len: chars.len(),
            input: PeekIter::new(chars.into_iter()),
            output: Vec::new(),
        }
    }

    fn scan(&mut self) {
        while let Some(&(pos, c)) = self.input.peek() {
            match c {
                _ if c.is_whitespace() => {
                    self.input.next();
                }
                _ if is_symbol(c) => self.scan_symbol(pos, c),
                _ => self.scan_operand(pos),
            }
        }

        self.output
            .push(Token::new(TokenType::EOF, (self.len, self.len + 1)));
    }

    fn scan_symbol(&mut self, pos: usize, c: char) {
        use TokenType::*;
        self.input.next();
        let ty = match c {
            '+' => Plus,
            '-' => Minus,
            '×' => Mult,
            '÷' => Div,
            '(' => OpenParen,
            _ => CloseParen,
        };
        self.output.push(Token::new(ty, (pos, pos + 1)));
    }

    fn scan_operand(&mut self, pos: usize) {
        let operand: String = self
            .input
            .collect_while::<_, Vec<_>>(|&(_, c)| !c.is_whitespace() && !is_symbol(c))
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        let hi = pos + operand.chars().count();
        self.output
            .push(Token::new(TokenType::Operand(operand), (pos, hi)));
    }
}

#[cfg(test)]
mod tests {
    // Tests the scanner's output against a humanized string representation of the expected
    // tokens. See [Token]'s impl of Display for more details.
    macro_rules! scanner_tests {
        ($($name:ident: $program:expr, $format_str:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::scanner::scan;

                let mut tokens = scan($program)
                    .into_iter()
                    .map(|tok| tok.to_string())
                    .collect::<Vec<_>>();
                tokens.pop();
                assert_eq!(tokens.join(" "), $format_str);
            }
        )*
        }
    }

    mod scan {
        scanner_tests! {
            integer: "2", "2"
            proper_fraction: "3/5", "3/5"
            mixed_number: "2'3/8", "2'3/8"
            plus: "+", "+"
            minus: "-", "-"
            mult: "×", "×"
            div: "÷", "÷"
            open_paren: "(", "("
            close_paren: ")", ")"

            empty_string: "", ""
            skip_whitespace: "  +  ", "+"

            multiple_operands: "1 2/3 4'1/2", "1 2/3 4'1/2"
            no_spaces: "1+2×(3÷4)", "1 + 2 × ( 3 ÷ 4 )"
            expression: "(1/2 - 1/3) × 2'1/4", "( 1/2 - 1/3 ) × 2'1/4"

            // Anything that isn't an operator or paren is an operand; the parser rejects it.
            garbage: "a * b", "a * b"
            ascii_star_is_not_an_operator: "1*2", "1*2"
        }
    }

    mod spans {
        use crate::common::Span;
        use crate::scanner::scan;

        #[test]
        fn spans_count_characters() {
            let spans: Vec<Span> = scan("12 × 3/4").into_iter().map(|t| t.span).collect();
            assert_eq!(
                spans,
                vec![
                    Span::from(0..2),
                    Span::from(3..4),
                    Span::from(5..8),
                    Span::from(8..9),
                ]
            );
        }
    }
}
