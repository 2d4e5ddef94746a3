/*!
Recursive‑descent parser for subjs expressions.

The parser pulls tokens from a [`Lexer`] one at a time, keeping a single
look‑ahead token, and assembles one root [`Value`].  The first error (lexical
or syntactic) aborts the parse; no partial tree is returned.

Grammar (EBNF)
--------------

```text
expression → factor ( "+" factor )* ;
factor     → NUMBER
           | STRING suffix*
           | "(" expression ")" suffix*
           | IDENT ( "." IDENT )* ( "(" arguments? ")" suffix* )? ;
suffix     → "." IDENT "(" arguments? ")" ;
arguments  → expression ( "," expression )* ;
```

* `a.b.c`          → `Path([a, b, c])`
* `f(1)`           → `Call { name: f, args: [1] }`
* `a.b.c()`        → `MethodCall { receiver: [a, b], method: c, args: [] }`
* `("x"+"y").m()`  → `MethodCall { receiver: [Add("x", "y")], method: m, .. }`
* `'abc'.len()`    → `MethodCall { receiver: ["abc"], method: len, .. }`

`+` is left‑associative: `a+b+c` nests as `Add(Add(a, b), c)`.  Parentheses
leave no node of their own, so `(X)` and `X` parse identically.

Groups and argument lists may nest at most [`MAX_DEPTH`] levels; deeper input
is rejected with a parse error instead of exhausting the stack.

### Logging Policy

| Location                 | Level   | Purpose                                    |
|--------------------------|---------|--------------------------------------------|
| `Parser::new`, `parse`   | `info`  | Lifecycle milestones.                      |
| productions              | `debug` | Descent into grammar branches.             |
| error paths              | `info`  | Via `SubjsError::parse`.                   |
*/

use std::mem;

use crate::error::{Result, SubjsError};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use crate::value::{AddExpr, CallExpr, Ident, MethodCallExpr, Value};

use log::{debug, info};

/// Maximum nesting of groups and argument lists.
pub const MAX_DEPTH: usize = 64;

/// Single‑use parser over a token stream pulled from a [`Lexer`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  No token is pulled until [`Parser::parse`].
    pub fn new(lexer: Lexer<'a>) -> Self {
        info!("Parser created");

        Self {
            lexer,
            current: Token::new(TokenType::EOF, "", 0),
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse the whole input as one expression.
    pub fn parse(mut self) -> Result<Value> {
        info!("Beginning parse phase");

        self.current = self.lexer.next_token()?;

        let value: Value = self.expression()?;

        if !self.is_at_end() {
            return Err(SubjsError::parse(
                self.current.offset,
                format!(
                    "Unexpected {}, expected end of input",
                    self.current.describe()
                ),
            ));
        }

        info!("Parsed {} node", value.kind());

        Ok(value)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Value> {
        let mut expr: Value = self.factor()?;

        while self.matches(TokenType::PLUS)? {
            let right: Value = self.factor()?;

            expr = Value::Add(AddExpr::new(expr, right));
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Value> {
        let token: Token<'a> = self.advance()?;

        match token.token_type {
            TokenType::NUMBER(n) => Ok(Value::Number(n)),

            TokenType::STRING(s) => self.method_suffixes(Value::Str(s)),

            TokenType::LEFT_PAREN => {
                debug!("Entering group at offset {}", token.offset);

                self.enter(token.offset)?;

                let inner: Value = self.expression()?;

                self.consume(TokenType::RIGHT_PAREN, "Expected ')' after expression")?;

                self.depth -= 1;

                self.method_suffixes(inner)
            }

            TokenType::IDENTIFIER => self.ident_chain(Ident::new(token.lexeme)),

            _ => Err(SubjsError::parse(
                token.offset,
                format!("Expected expression, found {}", token.describe()),
            )),
        }
    }

    /// `IDENT ("." IDENT)* ("(" arguments ")")?`, with `first` already consumed.
    fn ident_chain(&mut self, first: Ident) -> Result<Value> {
        let mut name: Ident = first;
        let mut receiver: Vec<Ident> = Vec::new();

        while self.matches(TokenType::DOT)? {
            let next: Token<'a> =
                self.consume(TokenType::IDENTIFIER, "Expected identifier after '.'")?;

            receiver.push(mem::replace(&mut name, Ident::new(next.lexeme)));
        }

        if !self.matches(TokenType::LEFT_PAREN)? {
            receiver.push(name);

            debug!("Identifier path with {} segment(s)", receiver.len());

            return Ok(Value::Path(receiver));
        }

        let args: Vec<Value> = self.finish_arguments()?;

        let call: Value = if receiver.is_empty() {
            debug!("Call to '{}' with {} argument(s)", name, args.len());

            Value::Call(CallExpr { name, args })
        } else {
            debug!("Method call '{}' on {}-segment path", name, receiver.len());

            Value::MethodCall(MethodCallExpr {
                receiver: receiver.into_iter().map(Value::Ident).collect(),
                method: name,
                args,
            })
        };

        self.method_suffixes(call)
    }

    /// Zero or more `"." IDENT "(" arguments ")"`, each wrapping the previous
    /// result as a one-element receiver.
    fn method_suffixes(&mut self, mut receiver: Value) -> Result<Value> {
        while self.matches(TokenType::DOT)? {
            let method: Token<'a> =
                self.consume(TokenType::IDENTIFIER, "Expected method name after '.'")?;

            self.consume(TokenType::LEFT_PAREN, "Expected '(' after method name")?;

            let args: Vec<Value> = self.finish_arguments()?;

            debug!("Method call '{}' on {}", method.lexeme, receiver.kind());

            receiver = Value::MethodCall(MethodCallExpr {
                receiver: vec![receiver],
                method: Ident::new(method.lexeme),
                args,
            });
        }

        Ok(receiver)
    }

    /// Argument list after an already consumed `(`, through the closing `)`.
    fn finish_arguments(&mut self) -> Result<Vec<Value>> {
        let mut arguments: Vec<Value> = Vec::new();

        self.enter(self.current.offset)?;

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA)? {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after arguments")?;

        self.depth -= 1;

        Ok(arguments)
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Step one nesting level deeper, failing past [`MAX_DEPTH`].
    fn enter(&mut self, offset: usize) -> Result<()> {
        self.depth += 1;

        if self.depth > MAX_DEPTH {
            return Err(SubjsError::parse(offset, "Expression nested too deeply"));
        }

        Ok(())
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> Result<bool> {
        if self.check(ttype) {
            self.advance()?;

            return Ok(true);
        }

        Ok(false)
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<Token<'a>> {
        if self.check(ttype) {
            return self.advance();
        }

        Err(SubjsError::parse(
            self.current.offset,
            format!("{}, found {}", message, self.current.describe()),
        ))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        self.current.token_type == ttype
    }

    /// Pull the next token and hand back the one it replaces.
    #[inline(always)]
    fn advance(&mut self) -> Result<Token<'a>> {
        let next: Token<'a> = self.lexer.next_token()?;

        Ok(mem::replace(&mut self.current, next))
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.current.token_type, TokenType::EOF)
    }
}

/// Lex and parse `src` as a single expression.
pub fn parse(src: &str) -> Result<Value> {
    Parser::new(Lexer::new(src)).parse()
}
