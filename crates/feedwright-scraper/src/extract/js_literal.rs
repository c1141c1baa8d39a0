//! Parser for JavaScript data literals embedded in pages.
//!
//! Accepts object, array, string, number, boolean, `null`, and `undefined`
//! literals with JavaScript's relaxed syntax (unquoted keys, single quotes,
//! trailing commas, `void 0`, `!0`/`!1`). It also understands the parameter
//! binding wrapper Nuxt emits:
//!
//! ```text
//! (function(a,b){return {title:a,list:[b]}}("x",1))
//! ```
//!
//! where each identifier in the returned literal is bound to the matching
//! argument. Nothing is ever executed: calls, operators, and statements other
//! than the single `return` are parse errors.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::error::ScraperError;

/// Isolates the expression assigned after `marker` in an inline script:
/// everything up to the closing `</script>`, minus a trailing `;`.
#[must_use]
pub fn extract_assignment<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let start = html.find(marker)? + marker.len();
    let len = html[start..].find("</script>")?;
    let expr = html[start..start + len].trim();
    Some(expr.strip_suffix(';').unwrap_or(expr).trim_end())
}

/// Parses a literal expression into JSON.
///
/// # Errors
///
/// Returns [`ScraperError::Literal`] with the byte offset of the first
/// construct that is not plain literal syntax.
pub fn parse(src: &str) -> Result<Value, ScraperError> {
    let mut parser = Parser::new(src);
    let value = parser.parse_document()?;
    parser.skip_ws();
    parser.eat(b';');
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    bindings: HashMap<&'a str, Value>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            bindings: HashMap::new(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> ScraperError {
        ScraperError::Literal {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ScraperError> {
        self.skip_ws();
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", char::from(byte))))
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if is_ident_start(c) => {}
            _ => return None,
        }
        let len = chars
            .find(|(_, c)| !is_ident_continue(*c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        Some(&rest[..len])
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.pos;
        if self.ident() == Some(keyword) {
            true
        } else {
            self.pos = start;
            false
        }
    }

    fn parse_document(&mut self) -> Result<Value, ScraperError> {
        self.skip_ws();
        let start = self.pos;
        if self.eat(b'(') {
            self.skip_ws();
            if self.eat_keyword("function") {
                return self.parse_wrapper();
            }
            let value = self.parse_value()?;
            self.expect(b')')?;
            return Ok(value);
        }
        self.pos = start;
        self.parse_value()
    }

    /// Called just after `(function`.
    fn parse_wrapper(&mut self) -> Result<Value, ScraperError> {
        self.skip_ws();
        let _name = self.ident();
        self.expect(b'(')?;

        let mut params = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b')') {
                break;
            }
            let name = self
                .ident()
                .ok_or_else(|| self.error("expected parameter name"))?;
            params.push(name);
            self.skip_ws();
            if !self.eat(b',') {
                self.expect(b')')?;
                break;
            }
        }

        self.skip_ws();
        let body_start = self.pos;
        self.expect(b'{')?;
        self.skip_block()?;
        let body_end = self.pos;

        // Both `}(args))` and `})(args)` call forms occur in the wild.
        self.skip_ws();
        let args = if self.eat(b'(') {
            let args = self.parse_args()?;
            self.expect(b')')?;
            args
        } else {
            self.expect(b')')?;
            self.expect(b'(')?;
            self.parse_args()?
        };
        let after_call = self.pos;

        let mut args = args.into_iter();
        for name in params {
            self.bindings.insert(name, args.next().unwrap_or(Value::Null));
        }

        self.pos = body_start;
        self.expect(b'{')?;
        self.skip_ws();
        if !self.eat_keyword("return") {
            return Err(self.error("function body must be a single return statement"));
        }
        let value = self.parse_value()?;
        self.skip_ws();
        self.eat(b';');
        self.expect(b'}')?;
        if self.pos != body_end {
            return Err(self.error("function body must be a single return statement"));
        }

        self.pos = after_call;
        Ok(value)
    }

    /// Parses comma-separated values up to and including the closing `)`.
    fn parse_args(&mut self) -> Result<Vec<Value>, ScraperError> {
        let mut args = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b')') {
                return Ok(args);
            }
            args.push(self.parse_value()?);
            self.skip_ws();
            if !self.eat(b',') {
                self.expect(b')')?;
                return Ok(args);
            }
        }
    }

    /// Skips to just past the `}` matching an already consumed `{`.
    fn skip_block(&mut self) -> Result<(), ScraperError> {
        let mut depth = 1usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'"' | b'\'' | b'`' => {
                    self.skip_string(byte)?;
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(self.error("unterminated function body"))
    }

    fn skip_string(&mut self, quote: u8) -> Result<(), ScraperError> {
        let start = self.pos;
        self.pos += 1;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\\' {
                self.pos += 1;
            } else if byte == quote {
                return Ok(());
            }
        }
        self.pos = start;
        Err(self.error("unterminated string"))
    }

    fn parse_value(&mut self) -> Result<Value, ScraperError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(quote @ (b'"' | b'\'')) => self.parse_string(quote).map(Value::String),
            Some(b'!') => self.parse_bang(),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.parse_number(),
            Some(_) => self.parse_word(),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ScraperError> {
        self.expect(b'{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.eat(b'}') {
                return Ok(Value::Object(map));
            }
            let key = self.parse_key()?;
            self.expect(b':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            if !self.eat(b',') {
                self.expect(b'}')?;
                return Ok(Value::Object(map));
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ScraperError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => self.parse_string(quote),
            Some(b'0'..=b'9') => self.parse_number().map(|n| match n {
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            }),
            _ => self
                .ident()
                .map(str::to_owned)
                .ok_or_else(|| self.error("expected object key")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, ScraperError> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(b']') {
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            if !self.eat(b',') {
                self.expect(b']')?;
                return Ok(Value::Array(items));
            }
        }
    }

    fn parse_bang(&mut self) -> Result<Value, ScraperError> {
        self.pos += 1;
        self.skip_ws();
        let value = match self.peek() {
            Some(b'0') => Value::Bool(true),
            Some(b'1') => Value::Bool(false),
            _ => return Err(self.error("only !0 and !1 are supported")),
        };
        self.pos += 1;
        if self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(self.error("only !0 and !1 are supported"));
        }
        Ok(value)
    }

    fn parse_word(&mut self) -> Result<Value, ScraperError> {
        let start = self.pos;
        let word = self
            .ident()
            .ok_or_else(|| self.error("unexpected character"))?;
        match word {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            "void" => {
                self.skip_ws();
                self.parse_number()?;
                Ok(Value::Null)
            }
            name => {
                if let Some(bound) = self.bindings.get(name) {
                    return Ok(bound.clone());
                }
                self.pos = start;
                Err(self.error(format!("unknown identifier '{name}'")))
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, ScraperError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let rest = self.rest();
        if rest.starts_with("0x") || rest.starts_with("0X") {
            let digits_len = rest[2..]
                .bytes()
                .take_while(u8::is_ascii_hexdigit)
                .count();
            let digits = &rest[2..2 + digits_len];
            let value = i64::from_str_radix(digits, 16)
                .map_err(|_| self.error("invalid hex literal"))?;
            self.pos += 2 + digits_len;
            return Ok(Value::from(if negative { -value } else { value }));
        }

        let bytes = rest.as_bytes();
        let mut len = 0;
        let mut is_float = false;
        while len < bytes.len() {
            match bytes[len] {
                b'0'..=b'9' => {}
                b'.' => is_float = true,
                b'e' | b'E' => {
                    is_float = true;
                    if matches!(bytes.get(len + 1), Some(b'+' | b'-')) {
                        len += 1;
                    }
                }
                _ => break,
            }
            len += 1;
        }
        if len == 0 {
            self.pos = start;
            return Err(self.error("invalid number"));
        }

        let text = &rest[..len];
        self.pos += len;
        let invalid = || ScraperError::Literal {
            offset: start,
            reason: format!("invalid number '{text}'"),
        };

        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Value::from(if negative { -value } else { value }));
            }
        }
        let value: f64 = text.parse().map_err(|_| invalid())?;
        let value = if negative { -value } else { value };
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn parse_string(&mut self, quote: u8) -> Result<String, ScraperError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.rest().chars().next() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };
            self.pos += c.len_utf8();
            if c == char::from(quote) {
                return Ok(out);
            }
            if c == '\\' {
                self.parse_escape(&mut out)?;
            } else {
                out.push(c);
            }
        }
    }

    /// Called just after a backslash inside a string.
    fn parse_escape(&mut self, out: &mut String) -> Result<(), ScraperError> {
        let Some(c) = self.rest().chars().next() else {
            return Err(self.error("unterminated escape"));
        };
        self.pos += c.len_utf8();
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(char::from_u32(code).ok_or_else(|| self.error("invalid \\x escape"))?);
            }
            'u' => {
                let code = self.unicode_escape()?;
                out.push(code);
            }
            // Line continuation.
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                self.eat(b'\n');
            }
            other => out.push(other),
        }
        Ok(())
    }

    /// Called just after `\u`; joins UTF-16 surrogate pairs.
    fn unicode_escape(&mut self) -> Result<char, ScraperError> {
        if self.eat(b'{') {
            let len = self.rest().find('}').ok_or_else(|| self.error("unterminated \\u{"))?;
            let code = u32::from_str_radix(&self.rest()[..len], 16)
                .map_err(|_| self.error("invalid \\u{} escape"))?;
            self.pos += len + 1;
            return char::from_u32(code).ok_or_else(|| self.error("invalid code point"));
        }

        let high = self.hex_digits(4)?;
        if (0xD800..0xDC00).contains(&high) && self.rest().starts_with("\\u") {
            let save = self.pos;
            self.pos += 2;
            let low = self.hex_digits(4)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code).ok_or_else(|| self.error("invalid surrogate pair"));
            }
            self.pos = save;
        }
        Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32, ScraperError> {
        let digits = self
            .rest()
            .get(..count)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid hex escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid hex escape"))?;
        self.pos += count;
        Ok(code)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
#[path = "js_literal_test.rs"]
mod tests;
