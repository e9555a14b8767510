//! CSS selector subset for the mock document
//!
//! Supported: type, `*`, `#id`, `.class`, `[attr]`, `[attr=v]`, `[attr^=v]`,
//! `[attr*=v]` (values quoted or bare), descendant and child (`>`)
//! combinators, and comma-separated groups. Anything else is rejected the
//! way `querySelector` throws a `SyntaxError`.

use core::iter::Peekable;
use core::str::Chars;

use vitrina_ports::DomError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttrSelector {
    pub name: String,
    pub op: AttrOp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
}

/// One comma-separated alternative: compounds joined by combinators.
/// The combinator stored with a compound links it to the previous one.
pub(crate) type Complex = Vec<(Combinator, Compound)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectorList(pub Vec<Complex>);

/// Element facts a selector can test
pub(crate) trait Subject {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl Compound {
    pub fn matches(&self, subject: &dyn Subject) -> bool {
        if let Some(tag) = &self.tag {
            if subject.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if subject.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| subject.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|sel| {
            let value = match subject.attr(&sel.name) {
                Some(v) => v,
                None => return false,
            };
            match &sel.op {
                AttrOp::Exists => true,
                AttrOp::Equals(expected) => value == expected,
                AttrOp::Prefix(prefix) => !prefix.is_empty() && value.starts_with(prefix.as_str()),
                AttrOp::Contains(needle) => !needle.is_empty() && value.contains(needle.as_str()),
            }
        })
    }
}

fn invalid(selector: &str) -> DomError {
    DomError::InvalidSelector(selector.to_string())
}

/// Parse a selector list
pub(crate) fn parse(selector: &str) -> Result<SelectorList, DomError> {
    let mut list = Vec::new();
    for group in split_groups(selector) {
        let group = group.trim();
        if group.is_empty() {
            return Err(invalid(selector));
        }
        list.push(parse_complex(group).ok_or_else(|| invalid(selector))?);
    }
    Ok(SelectorList(list))
}

/// Split on commas that are not inside brackets or quotes
fn split_groups(selector: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in selector.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                groups.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&selector[start..]);
    groups
}

fn parse_complex(input: &str) -> Option<Complex> {
    let mut parts = Vec::new();
    let mut chars = input.chars().peekable();
    let mut combinator = Combinator::Descendant;
    let mut dangling = false;

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None => break,
            Some('>') => {
                if parts.is_empty() || dangling {
                    return None;
                }
                chars.next();
                combinator = Combinator::Child;
                dangling = true;
                continue;
            }
            Some(_) => {}
        }
        let compound = parse_compound(&mut chars)?;
        parts.push((combinator, compound));
        combinator = Combinator::Descendant;
        dangling = false;
    }

    if parts.is_empty() || dangling {
        None
    } else {
        Some(parts)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// CSS identifiers may not start with a digit (so `#01` is invalid)
fn ident(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    let first = out.chars().next()?;
    if first.is_ascii_digit() {
        return None;
    }
    if first == '-' && out.chars().nth(1).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(out)
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut any = false;

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                compound.id = Some(ident(chars)?);
            }
            '.' => {
                chars.next();
                compound.classes.push(ident(chars)?);
            }
            '[' => {
                chars.next();
                compound.attrs.push(parse_attr(chars)?);
            }
            '*' => {
                if any {
                    return None;
                }
                chars.next();
            }
            c if is_ident_char(c) => {
                if any {
                    return None;
                }
                compound.tag = Some(ident(chars)?.to_ascii_lowercase());
            }
            c if c.is_whitespace() || c == '>' => break,
            _ => return None,
        }
        any = true;
    }

    any.then_some(compound)
}

fn parse_attr(chars: &mut Peekable<Chars<'_>>) -> Option<AttrSelector> {
    skip_ws(chars);
    let name = ident(chars)?;
    skip_ws(chars);

    let kind = match chars.next()? {
        ']' => {
            return Some(AttrSelector {
                name,
                op: AttrOp::Exists,
            })
        }
        '=' => '=',
        c @ ('^' | '*') => {
            if chars.next()? != '=' {
                return None;
            }
            c
        }
        _ => return None,
    };

    skip_ws(chars);
    let value = match chars.peek()? {
        '"' | '\'' => {
            let quote = chars.next()?;
            let mut value = String::new();
            loop {
                let c = chars.next()?;
                if c == quote {
                    break;
                }
                value.push(c);
            }
            value
        }
        _ => {
            let mut value = String::new();
            while let Some(&c) = chars.peek() {
                if !is_ident_char(c) {
                    break;
                }
                value.push(c);
                chars.next();
            }
            if value.is_empty() {
                return None;
            }
            value
        }
    };
    skip_ws(chars);
    if chars.next()? != ']' {
        return None;
    }

    let op = match kind {
        '^' => AttrOp::Prefix(value),
        '*' => AttrOp::Contains(value),
        _ => AttrOp::Equals(value),
    };
    Some(AttrSelector { name, op })
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_and_combinators() {
        let list = parse("#proyectos > li, .redes a").unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[0].len(), 2);
        assert_eq!(list.0[0][1].0, Combinator::Child);
        assert_eq!(list.0[1][1].0, Combinator::Descendant);
        assert_eq!(list.0[1][1].1.tag.as_deref(), Some("a"));
    }

    #[test]
    fn test_parse_attribute_operators() {
        let list = parse(r##"a[href^="#"][data-url][proyecto='01']"##).unwrap();
        let attrs = &list.0[0][0].1.attrs;
        assert_eq!(attrs[0].op, AttrOp::Prefix("#".to_string()));
        assert_eq!(attrs[1].op, AttrOp::Exists);
        assert_eq!(attrs[2].op, AttrOp::Equals("01".to_string()));
    }

    #[test]
    fn test_reject_malformed() {
        for bad in ["#", "", "a,", "> a", "a >", "#01", "[proyecto", "a[=x]", "a..b", "div!"] {
            assert!(parse(bad).is_err(), "expected {:?} to be rejected", bad);
        }
    }
}
