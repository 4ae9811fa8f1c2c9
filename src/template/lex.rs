//! Tokens of a template action, between `{{` and `}}`.

/// A lexical item of an action.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    /// `.A.B.C`; empty for the dot itself.
    Field(Vec<String>),
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Pipe,
    LParen,
    /// `)` with the field chain that immediately follows it, if any.
    RParen(Vec<String>),
}

/// A lexed action.
#[derive(Debug)]
pub(crate) struct Action {
    pub tokens: Vec<Token>,
    /// Byte offset just after the closing delimiter.
    pub end: usize,
    /// The action was closed by ` -}}`.
    pub trim_right: bool,
    /// The action is a `/* comment */`.
    pub comment: bool,
}

const KEYWORDS: [&str; 8] = ["if", "else", "end", "range", "with", "define",
                             "template", "block"];

#[inline]
fn is_space(c: char) -> bool { matches!(c, ' ' | '\t' | '\r' | '\n') }

#[inline]
fn is_ident(c: char) -> bool { c.is_alphanumeric() || c == '_' }

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str { &self.src[self.pos ..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip blanks, returning whether any was skipped.
    fn skip_space(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_space) { self.pos += 1 }
        self.pos > start
    }

    /// Try to consume a closing delimiter: `}}` or, after a blank,
    /// `-}}`.  Returns whether right trimming was requested.
    fn close(&mut self, spaced: bool) -> Option<bool> {
        if spaced && self.rest().starts_with("-}}") {
            self.pos += 3;
            Some(true)
        } else if self.rest().starts_with("}}") {
            self.pos += 2;
            Some(false)
        } else {
            None
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident) { self.bump(); }
        self.src[start .. self.pos].to_string()
    }

    /// A chain `.a.b` starting at a dot.
    fn chain(&mut self) -> Vec<String> {
        let mut chain = vec![];
        while self.rest().starts_with('.')
            && self.rest()[1 ..].chars().next().is_some_and(is_ident) {
            self.pos += 1;
            chain.push(self.ident());
        }
        chain
    }

    fn quoted(&mut self) -> Result<String, String> {
        let mut s = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(s),
                Some('\\') => match self.bump() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some(c @ ('\\' | '"')) => s.push(c),
                    Some(c) => return Err(format!("unknown escape sequence \\{c}")),
                    None => break,
                },
                Some('\n') | None => break,
                Some(c) => s.push(c),
            }
        }
        Err("unterminated quoted string".to_string())
    }

    fn raw(&mut self) -> Result<String, String> {
        match self.rest().find('`') {
            Some(n) => {
                let s = self.rest()[.. n].to_string();
                self.pos += n + 1;
                Ok(s)
            }
            None => Err("unterminated raw quoted string".to_string()),
        }
    }

    fn number(&mut self) -> Result<Token, String> {
        let start = self.pos;
        self.bump(); // sign or first digit
        while let Some(c) = self.peek() {
            let exp_sign = matches!(c, '+' | '-')
                && matches!(self.src[.. self.pos].chars().last(),
                            Some('e' | 'E'));
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_')
                || exp_sign {
                self.pos += 1;
            } else {
                break
            }
        }
        let text = &self.src[start .. self.pos];
        let digits = text.replace('_', "");
        if let Ok(n) = digits.parse::<i64>() {
            Ok(Token::Int(n))
        } else if let Ok(x) = digits.parse::<f64>() {
            Ok(Token::Float(x))
        } else {
            Err(format!("bad number syntax: {text:?}"))
        }
    }

    fn comment(&mut self) -> Result<Action, String> {
        let n = self.rest().find("*/").ok_or("unclosed comment")?;
        self.pos += n + 2;
        let spaced = self.skip_space();
        match self.close(spaced) {
            Some(trim_right) => Ok(Action { tokens: vec![], end: self.pos,
                                            trim_right, comment: true }),
            None => Err("comment ends before closing delimiter".to_string()),
        }
    }
}

/// Lex the action starting at byte `start` of `src` (just after the
/// opening delimiter and any left trim marker).
pub(crate) fn lex_action(src: &str, start: usize) -> Result<Action, String> {
    let mut lx = Lexer { src, pos: start };
    lx.skip_space();
    if lx.rest().starts_with("/*") {
        lx.pos += 2;
        return lx.comment()
    }
    lx.pos = start;
    let mut tokens = vec![];
    loop {
        let spaced = lx.skip_space();
        if let Some(trim_right) = lx.close(spaced) {
            return Ok(Action { tokens, end: lx.pos, trim_right,
                               comment: false })
        }
        let c = lx.peek().ok_or("unclosed action")?;
        let tok = match c {
            '|' => { lx.bump(); Token::Pipe }
            '(' => { lx.bump(); Token::LParen }
            ')' => { lx.bump(); Token::RParen(lx.chain()) }
            '.' => {
                let chain = lx.chain();
                if chain.is_empty() {
                    lx.bump();
                    if lx.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return Err("bad number syntax: leading dot".into())
                    }
                }
                Token::Field(chain)
            }
            '"' => { lx.bump(); Token::Str(lx.quoted()?) }
            '`' => { lx.bump(); Token::Str(lx.raw()?) }
            '$' => return Err("variables are not supported".into()),
            '-' | '+' | '0' ..= '9' => lx.number()?,
            c if is_ident(c) => {
                let id = lx.ident();
                if KEYWORDS.contains(&id.as_str()) {
                    return Err(format!("unsupported action {id:?}"))
                }
                Token::Ident(id)
            }
            c => return Err(format!("unexpected {c:?} in action")),
        };
        tokens.push(tok);
    }
}
