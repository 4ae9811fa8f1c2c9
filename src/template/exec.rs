//! Evaluation of template actions against a theme.

use std::collections::HashMap;
use std::fmt::{self, Write};

use lazy_static::lazy_static;
use rgb::RGBA8;

use super::parse::{Command, Node, Operand, Pipeline};
use super::Context;
use crate::theme::Role;
use crate::{ClassifiedTheme, RGBColor, TonalPalette};

/// A value flowing through a pipeline.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value<'a> {
    /// The data passed to the template (`.`).
    Root,
    Str(String),
    Int(i64),
    Float(f64),
    Color(RGBA8),
    Palette(&'a TonalPalette),
    Theme(&'a ClassifiedTheme),
}

impl Value<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Root => "data",
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float64",
            Value::Color(_) => "color.RGBA",
            Value::Palette(_) => "TonalPalette",
            Value::Theme(_) => "ClassifiedTheme",
        }
    }
}

/// Go's `%v` rendering of a color: `{r g b a}`.
fn write_color(f: &mut impl Write, c: RGBA8) -> fmt::Result {
    write!(f, "{{{} {} {} {}}}", c.r, c.g, c.b, c.a)
}

type Helper = for<'a> fn(Vec<Value<'a>>) -> Result<Value<'a>, String>;

fn to_hex<'a>(args: Vec<Value<'a>>) -> Result<Value<'a>, String> {
    match &args[..] {
        [Value::Color(c)] => Ok(Value::Str(c.to_hex())),
        [v] => Err(format!("toHex: expected color, got {}", v.type_name())),
        args => Err(format!("toHex: wrong number of args: {}", args.len())),
    }
}

fn to_rgba<'a>(args: Vec<Value<'a>>) -> Result<Value<'a>, String> {
    match &args[..] {
        [Value::Color(c), Value::Str(alpha)] =>
            Ok(Value::Str(format!("rgba({}, {}, {}, {alpha})", c.r, c.g, c.b))),
        [Value::Color(_), v] =>
            Err(format!("toRgba: expected string alpha, got {}", v.type_name())),
        [v, _] => Err(format!("toRgba: expected color, got {}", v.type_name())),
        args => Err(format!("toRgba: wrong number of args: {}", args.len())),
    }
}

fn tone<'a>(args: Vec<Value<'a>>) -> Result<Value<'a>, String> {
    match &args[..] {
        [Value::Palette(p), Value::Int(level)] => Ok(Value::Color(p.tone(*level))),
        // Integral float constants are accepted where an int is expected.
        [Value::Palette(p), Value::Float(x)] if x.fract() == 0. =>
            Ok(Value::Color(p.tone(*x as i64))),
        [Value::Palette(_), v] =>
            Err(format!("tone: expected int level, got {}", v.type_name())),
        [v, _] => Err(format!("tone: expected palette, got {}", v.type_name())),
        args => Err(format!("tone: wrong number of args: {}", args.len())),
    }
}

lazy_static! {
    /// Functions available to templates, with their number of arguments.
    static ref HELPERS: HashMap<&'static str, (usize, Helper)> = {
        let mut m: HashMap<&'static str, (usize, Helper)> = HashMap::new();
        m.insert("toHex", (1, to_hex));
        m.insert("toRgba", (2, to_rgba));
        m.insert("tone", (2, tone));
        m
    };
}

pub(crate) fn is_helper(name: &str) -> bool { HELPERS.contains_key(name) }

fn call<'a>(name: &str, args: Vec<Value<'a>>) -> Result<Value<'a>, String> {
    let &(arity, f) = HELPERS.get(name)
        .ok_or_else(|| format!("function {name:?} not defined"))?;
    if args.len() != arity {
        return Err(format!("wrong number of args for {name}: want {arity} got {}",
                           args.len()))
    }
    f(args)
}

fn field<'a>(ctx: &Context<'a>, v: Value<'a>, name: &str)
             -> Result<Value<'a>, String> {
    let type_name = v.type_name();
    let found = match v {
        Value::Root => match name {
            "Monitor" => Some(Value::Str(ctx.monitor.to_string())),
            "Wallpaper" => Some(Value::Str(ctx.wallpaper.to_string())),
            "Theme" => Some(Value::Theme(ctx.theme)),
            _ => None,
        },
        Value::Theme(t) => Role::ALL.iter()
            .find(|r| r.name() == name)
            .map(|&r| Value::Palette(t.palette(r)))
            .or_else(|| t.derived(name).map(Value::Color)),
        Value::Color(c) => match name {
            "R" => Some(Value::Int(c.r as i64)),
            "G" => Some(Value::Int(c.g as i64)),
            "B" => Some(Value::Int(c.b as i64)),
            "A" => Some(Value::Int(c.a as i64)),
            _ => None,
        },
        _ => None,
    };
    found.ok_or_else(|| format!("can't evaluate field {name} in type {type_name}"))
}

fn chain<'a>(ctx: &Context<'a>, mut v: Value<'a>, names: &[String])
             -> Result<Value<'a>, String> {
    for name in names { v = field(ctx, v, name)? }
    Ok(v)
}

fn operand<'a>(ctx: &Context<'a>, op: &Operand) -> Result<Value<'a>, String> {
    match op {
        Operand::Field(names) => chain(ctx, Value::Root, names),
        Operand::Str(s) => Ok(Value::Str(s.clone())),
        Operand::Int(n) => Ok(Value::Int(*n)),
        Operand::Float(x) => Ok(Value::Float(*x)),
        Operand::Sub(p, names) => {
            let v = pipeline(ctx, p)?;
            chain(ctx, v, names)
        }
        Operand::Func(name) => call(name, vec![]),
    }
}

fn command<'a>(ctx: &Context<'a>, cmd: &Command, piped: Option<Value<'a>>)
               -> Result<Value<'a>, String> {
    match cmd.args.split_first() {
        Some((Operand::Func(name), rest)) => {
            let mut args = rest.iter().map(|op| operand(ctx, op))
                .collect::<Result<Vec<_>, _>>()?;
            args.extend(piped);
            call(name, args)
        }
        Some((op, [])) if piped.is_none() => operand(ctx, op),
        Some(_) => Err("can't give argument to non-function".into()),
        None => Err("missing value for command".into()),
    }
}

fn pipeline<'a>(ctx: &Context<'a>, p: &Pipeline) -> Result<Value<'a>, String> {
    let mut piped = None;
    for cmd in &p.cmds {
        piped = Some(command(ctx, cmd, piped)?);
    }
    piped.ok_or_else(|| "missing value for command".into())
}

fn print(out: &mut String, v: &Value) -> Result<(), String> {
    match v {
        Value::Str(s) => out.push_str(s),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(x) => out.push_str(&x.to_string()),
        Value::Color(c) => write_color(out, *c).map_err(|e| e.to_string())?,
        Value::Palette(p) => {
            out.push_str("{map[");
            for (i, (level, c)) in p.iter().enumerate() {
                if i > 0 { out.push(' ') }
                write!(out, "{level}:").map_err(|e| e.to_string())?;
                write_color(out, c).map_err(|e| e.to_string())?;
            }
            out.push_str("]}");
        }
        Value::Root | Value::Theme(_) =>
            return Err(format!("can't print value of type {}", v.type_name())),
    }
    Ok(())
}

/// Execute `nodes`, returning the line and message of the first failing
/// action.
pub(crate) fn execute(nodes: &[Node], ctx: &Context)
                      -> Result<String, (usize, String)> {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(s) => out.push_str(s),
            Node::Action { line, pipe } => {
                let v = pipeline(ctx, pipe).map_err(|e| (*line, e))?;
                print(&mut out, &v).map_err(|e| (*line, e))?;
            }
        }
    }
    Ok(out)
}
