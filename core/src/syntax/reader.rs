//! PEST-based reader producing the generic syntax tree

use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::{
    KeyKind, ListNode, Literal, LiteralNode, Node, ObjectItem, ObjectKey, ObjectList, ObjectNode,
};
use crate::diagnostics::{Diagnostic, Position};

#[derive(Parser)]
#[grammar = "syntax/hcl.pest"]
struct HclParser;

/// Read source text into a syntax tree.
///
/// A syntax failure is reported as a single fatal diagnostic; `file` is
/// stamped on every position in the tree (pass `""` for anonymous input).
pub fn read(source: &str, file: &str) -> Result<ObjectList, Diagnostic> {
    let pairs = HclParser::parse(Rule::file, source).map_err(|err| syntax_error(err, file))?;
    let reader = Reader { file };

    let mut root = ObjectList::default();
    for pair in pairs.flat_map(|top| top.into_inner()) {
        if pair.as_rule() == Rule::object_list {
            root = reader.object_list(pair)?;
        }
    }

    tracing::trace!(items = root.items.len(), file, "read syntax tree");
    Ok(root)
}

/* ===================== Error Conversion ===================== */

fn syntax_error(err: pest::error::Error<Rule>, file: &str) -> Diagnostic {
    let (line, column) = match &err.line_col {
        LineColLocation::Pos((line, col)) => (*line, *col),
        LineColLocation::Span((line, col), _) => (*line, *col),
    };
    let err = err.renamed_rules(describe_rule);
    tracing::debug!(line, column, file, "syntax error");
    Diagnostic::fatal(
        Position::new(file, line, column),
        format!("Syntax error: {}", err.variant.message()),
    )
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::object => "start of object ('{')".to_string(),
        Rule::assign => "assignment ('=')".to_string(),
        Rule::object_key | Rule::object_item | Rule::ident => "key".to_string(),
        Rule::list => "list ('[')".to_string(),
        Rule::string => "string".to_string(),
        Rule::number | Rule::float => "number".to_string(),
        Rule::boolean => "bool".to_string(),
        Rule::EOI => "end of file".to_string(),
        other => format!("{:?}", other),
    }
}

/* ===================== Tree Builder ===================== */

struct Reader<'f> {
    file: &'f str,
}

impl Reader<'_> {
    fn position(&self, pair: &Pair<Rule>) -> Position {
        let (line, column) = pair.as_span().start_pos().line_col();
        Position::new(self.file, line, column)
    }

    fn object_list(&self, pair: Pair<Rule>) -> Result<ObjectList, Diagnostic> {
        let items = pair
            .into_inner()
            .map(|item| self.object_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ObjectList { items })
    }

    fn object_item(&self, pair: Pair<Rule>) -> Result<ObjectItem, Diagnostic> {
        let position = self.position(&pair);
        let mut keys = Vec::new();
        let mut assign = None;
        let mut value = None;

        // object_item -> assignment | block -> key(s), optional `=`, value
        for part in pair.into_inner().flat_map(|shape| shape.into_inner()) {
            match part.as_rule() {
                Rule::object_key => keys.push(self.object_key(part)?),
                Rule::assign => assign = Some(self.position(&part)),
                _ => value = Some(self.node(part)?),
            }
        }

        let value = value.ok_or_else(|| {
            Diagnostic::fatal(position, "Internal error: item without a value")
        })?;
        Ok(ObjectItem {
            keys,
            assign,
            value,
        })
    }

    fn object_key(&self, pair: Pair<Rule>) -> Result<ObjectKey, Diagnostic> {
        let position = self.position(&pair);
        let inner = pair
            .into_inner()
            .next()
            .ok_or_else(|| Diagnostic::fatal(position.clone(), "Internal error: empty key"))?;
        let text = inner.as_str().to_string();

        let (kind, name) = match inner.as_rule() {
            Rule::string => (KeyKind::String, string_content(inner)),
            _ => (KeyKind::Ident, text.clone()),
        };

        Ok(ObjectKey {
            kind,
            name,
            text,
            position,
        })
    }

    fn node(&self, pair: Pair<Rule>) -> Result<Node, Diagnostic> {
        let position = self.position(&pair);

        match pair.as_rule() {
            Rule::object => {
                let list = match pair.into_inner().next() {
                    Some(list) => self.object_list(list)?,
                    None => ObjectList::default(),
                };
                Ok(Node::Object(ObjectNode { list, position }))
            }
            Rule::list => {
                let items = pair
                    .into_inner()
                    .map(|item| self.node(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::List(ListNode { items, position }))
            }
            Rule::string => Ok(literal(Literal::String(string_content(pair)), position)),
            Rule::boolean => Ok(literal(Literal::Bool(pair.as_str() == "true"), position)),
            Rule::float => {
                let text = pair.as_str();
                let value = text.parse::<f64>().map_err(|_| {
                    Diagnostic::fatal(position.clone(), format!("Invalid number `{}'", text))
                })?;
                Ok(literal(Literal::Float(value), position))
            }
            Rule::number => {
                let text = pair.as_str();
                let value = parse_integer(text).ok_or_else(|| {
                    Diagnostic::fatal(position.clone(), format!("Invalid number `{}'", text))
                })?;
                Ok(literal(Literal::Number(value), position))
            }
            other => Err(Diagnostic::fatal(
                position,
                format!("Internal error: unexpected value rule {:?}", other),
            )),
        }
    }
}

fn literal(value: Literal, position: Position) -> Node {
    Node::Literal(LiteralNode { value, position })
}

/// Decoded content of a `string` pair
fn string_content(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|inner| unescape(inner.as_str()))
        .unwrap_or_default()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Integers: decimal `123`, hex `0x7b`, octal `0173`
fn parse_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}
