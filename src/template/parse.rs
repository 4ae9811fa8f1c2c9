//! Template syntax tree.

use super::exec::is_helper;
use super::lex::{lex_action, Token};

#[derive(Debug, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Action { line: usize, pipe: Pipeline },
}

/// Commands separated by `|`.  The value of each command is passed as
/// the last argument of the next one.
#[derive(Debug, PartialEq)]
pub(crate) struct Pipeline {
    pub cmds: Vec<Command>,
}

/// A function call (first operand is a [`Operand::Func`]) or a single
/// operand.
#[derive(Debug, PartialEq)]
pub(crate) struct Command {
    pub args: Vec<Operand>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Operand {
    Field(Vec<String>),
    Func(String),
    Str(String),
    Int(i64),
    Float(f64),
    /// Parenthesized pipeline followed by a field chain.
    Sub(Pipeline, Vec<String>),
}

const BLANKS: &[char] = &[' ', '\t', '\r', '\n'];

/// Parse `src` into nodes.  Errors carry the line of the offending
/// action.
pub(crate) fn parse(src: &str) -> Result<Vec<Node>, (usize, String)> {
    let mut nodes = vec![];
    let mut pos = 0;
    let mut trim_next = false;
    while let Some(open) = src[pos ..].find("{{").map(|n| pos + n) {
        let line = src[.. open].matches('\n').count() + 1;
        let mut text = &src[pos .. open];
        if trim_next { text = text.trim_start_matches(BLANKS) }
        let mut start = open + 2;
        let rest = &src[start ..];
        let trim_left = rest.starts_with('-')
            && rest[1 ..].starts_with(BLANKS);
        if trim_left {
            text = text.trim_end_matches(BLANKS);
            start += 1;
        }
        if !text.is_empty() { nodes.push(Node::Text(text.to_string())) }
        let action = lex_action(src, start).map_err(|e| (line, e))?;
        if !action.comment {
            let pipe = parse_action(action.tokens).map_err(|e| (line, e))?;
            nodes.push(Node::Action { line, pipe });
        }
        trim_next = action.trim_right;
        pos = action.end;
    }
    let mut text = &src[pos ..];
    if trim_next { text = text.trim_start_matches(BLANKS) }
    if !text.is_empty() { nodes.push(Node::Text(text.to_string())) }
    Ok(nodes)
}

fn parse_action(tokens: Vec<Token>) -> Result<Pipeline, String> {
    let (pipe, _) = pipeline(&mut tokens.into_iter(), false)?;
    Ok(pipe)
}

type Tokens = std::vec::IntoIter<Token>;

/// Parse a pipeline.  Inside parentheses, also return the field chain
/// following the closing parenthesis.
fn pipeline(tokens: &mut Tokens, in_paren: bool)
            -> Result<(Pipeline, Vec<String>), String> {
    let mut cmds = vec![];
    let mut args = vec![];
    loop {
        match tokens.next() {
            None if in_paren => return Err("unclosed left paren".into()),
            None => {
                push_command(&mut cmds, args)?;
                return Ok((Pipeline { cmds }, vec![]))
            }
            Some(Token::RParen(chain)) if in_paren => {
                push_command(&mut cmds, args)?;
                return Ok((Pipeline { cmds }, chain))
            }
            Some(Token::RParen(_)) => return Err("unexpected right paren".into()),
            Some(Token::Pipe) => {
                push_command(&mut cmds, args)?;
                args = vec![];
            }
            Some(Token::LParen) => {
                let (sub, chain) = pipeline(tokens, true)?;
                args.push(Operand::Sub(sub, chain));
            }
            Some(Token::Field(chain)) => args.push(Operand::Field(chain)),
            Some(Token::Str(s)) => args.push(Operand::Str(s)),
            Some(Token::Int(n)) => args.push(Operand::Int(n)),
            Some(Token::Float(x)) => args.push(Operand::Float(x)),
            Some(Token::Ident(name)) => {
                if !is_helper(&name) {
                    return Err(format!("function {name:?} not defined"))
                }
                if !args.is_empty() {
                    return Err(format!("function {name:?} used as an \
                                        argument; wrap the call in parentheses"))
                }
                args.push(Operand::Func(name));
            }
        }
    }
}

fn push_command(cmds: &mut Vec<Command>, args: Vec<Operand>)
                -> Result<(), String> {
    match args.first() {
        None => return Err("missing value for command".into()),
        Some(Operand::Func(_)) => (),
        Some(_) if args.len() > 1 =>
            return Err("can't give argument to non-function".into()),
        Some(_) if !cmds.is_empty() =>
            return Err("can't give argument to non-function".into()),
        Some(_) => (),
    }
    cmds.push(Command { args });
    Ok(())
}
