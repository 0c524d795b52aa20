//! Expression trees
//!
//! A [`Form`] is the immutable tree the printer works on: either an atom
//! or an ordered sequence of forms. Forms are never evaluated here; they
//! only carry the structure of example code and of evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A code expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Form {
    /// Absent value
    Nil,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String literal
    Str(String),
    /// Character literal
    Char(char),
    /// Bare symbol, e.g. `let` or `my-fn`
    Symbol(String),
    /// Keyword, stored without the leading colon
    Keyword(String),
    /// Parenthesised list; the first element is its head
    List(Vec<Form>),
    /// Square-bracket vector
    Vector(Vec<Form>),
    /// Key/value map, entries in source order
    Map(Vec<(Form, Form)>),
    /// Set literal
    Set(Vec<Form>),
}

impl Form {
    /// Create a symbol
    pub fn sym(name: impl Into<String>) -> Self {
        Form::Symbol(name.into())
    }

    /// Create a keyword (without the leading colon)
    pub fn kw(name: impl Into<String>) -> Self {
        Form::Keyword(name.into())
    }

    /// Create a string literal
    pub fn str(value: impl Into<String>) -> Self {
        Form::Str(value.into())
    }

    /// Create a list
    pub fn list(items: impl IntoIterator<Item = Form>) -> Self {
        Form::List(items.into_iter().collect())
    }

    /// Create a vector
    pub fn vector(items: impl IntoIterator<Item = Form>) -> Self {
        Form::Vector(items.into_iter().collect())
    }

    /// Create a call-shaped list: `(head args...)`
    pub fn call(head: impl Into<String>, args: impl IntoIterator<Item = Form>) -> Self {
        let mut items = vec![Form::sym(head)];
        items.extend(args);
        Form::List(items)
    }

    /// Whether this is a compound form
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Form::List(_) | Form::Vector(_) | Form::Map(_) | Form::Set(_)
        )
    }

    /// Number of direct sub-elements (map entries count as two)
    pub fn len(&self) -> usize {
        match self {
            Form::List(items) | Form::Vector(items) | Form::Set(items) => items.len(),
            Form::Map(entries) => entries.len() * 2,
            _ => 0,
        }
    }

    /// Whether the form has no sub-elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Head symbol name of a list, if it has one
    pub fn head_name(&self) -> Option<&str> {
        match self {
            Form::List(items) => match items.first() {
                Some(Form::Symbol(name)) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

fn write_seq(f: &mut Formatter<'_>, open: &str, items: &[Form], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

/// Plain source-text representation.
///
/// String atoms are wrapped in double quotes verbatim, without escaping.
impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Form::Nil => f.write_str("nil"),
            Form::Bool(b) => write!(f, "{}", b),
            Form::Int(n) => write!(f, "{}", n),
            Form::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Form::Str(s) => write!(f, "\"{}\"", s),
            Form::Char(c) => match c {
                ' ' => f.write_str("\\space"),
                '\n' => f.write_str("\\newline"),
                '\t' => f.write_str("\\tab"),
                c => write!(f, "\\{}", c),
            },
            Form::Symbol(name) => f.write_str(name),
            Form::Keyword(name) => write!(f, ":{}", name),
            Form::List(items) => write_seq(f, "(", items, ")"),
            Form::Vector(items) => write_seq(f, "[", items, "]"),
            Form::Set(items) => write_seq(f, "#{", items, "}"),
            Form::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<i64> for Form {
    fn from(n: i64) -> Self {
        Form::Int(n)
    }
}

impl From<f64> for Form {
    fn from(x: f64) -> Self {
        Form::Float(x)
    }
}

impl From<bool> for Form {
    fn from(b: bool) -> Self {
        Form::Bool(b)
    }
}

impl From<&str> for Form {
    fn from(s: &str) -> Self {
        Form::Str(s.to_string())
    }
}
