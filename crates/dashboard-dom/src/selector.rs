//! A small CSS selector engine for the in-memory tree.
//!
//! Supports compound selectors made of a tag (or `*`), `#id`, `.class`,
//! `[attr]` and `[attr=value]`, joined by descendant (whitespace) and child
//! (`>`) combinators. Selector lists, pseudo-classes and sibling combinators
//! are not supported.

use dashboard_core::{DashboardError, DashboardResult};

/// Node accessors needed to match a selector.
pub trait SelectorTarget: Sized {
    fn tag_name(&self) -> String;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches<T: SelectorTarget>(&self, node: &T) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != node.tag_name() {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| match (&attr.value, node.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => *expected == actual,
        })
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Each compound with the combinator linking it to the previous one.
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    pub fn parse(source: &str) -> DashboardResult<Self> {
        let invalid = |reason: &str| {
            tracing::debug!("Invalid selector {:?}: {}", source, reason);
            DashboardError::InvalidSelector(format!("{source:?}: {reason}"))
        };

        let chars: Vec<char> = source.trim().chars().collect();
        if chars.is_empty() {
            return Err(invalid("empty selector"));
        }

        let mut parts = Vec::new();
        let mut pending: Option<Combinator> = None;
        let mut pos = 0;

        while pos < chars.len() {
            let c = chars[pos];

            if c.is_whitespace() {
                if !parts.is_empty() && pending.is_none() {
                    pending = Some(Combinator::Descendant);
                }
                pos += 1;
                continue;
            }

            if c == '>' {
                if parts.is_empty() || pending == Some(Combinator::Child) {
                    return Err(invalid("misplaced '>'"));
                }
                pending = Some(Combinator::Child);
                pos += 1;
                continue;
            }

            if !parts.is_empty() && pending.is_none() {
                return Err(invalid("unexpected character"));
            }

            let (compound, next) = parse_compound(&chars, pos).map_err(|reason| invalid(&reason))?;
            parts.push((pending.take().unwrap_or(Combinator::Descendant), compound));
            pos = next;
        }

        if pending == Some(Combinator::Child) {
            return Err(invalid("dangling '>'"));
        }

        Ok(Self { parts })
    }

    /// Whether `node` matches, looking at ancestors for the leading compounds.
    pub fn matches<T: SelectorTarget>(&self, node: &T) -> bool {
        self.matches_at(node, self.parts.len() - 1)
    }

    fn matches_at<T: SelectorTarget>(&self, node: &T, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        if !compound.matches(node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => node
                .parent()
                .is_some_and(|parent| self.matches_at(&parent, index - 1)),
            Combinator::Descendant => {
                let mut cursor = node.parent();
                while let Some(ancestor) = cursor {
                    if self.matches_at(&ancestor, index - 1) {
                        return true;
                    }
                    cursor = ancestor.parent();
                }
                false
            }
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_name(chars: &[char], mut pos: usize) -> (String, usize) {
    let start = pos;
    while pos < chars.len() && is_name_char(chars[pos]) {
        pos += 1;
    }
    (chars[start..pos].iter().collect(), pos)
}

fn parse_compound(chars: &[char], mut pos: usize) -> Result<(Compound, usize), String> {
    let mut compound = Compound::default();

    if chars[pos] == '*' {
        compound.tag = Some("*".to_string());
        pos += 1;
    } else if is_name_char(chars[pos]) {
        let (name, next) = read_name(chars, pos);
        compound.tag = Some(name.to_ascii_lowercase());
        pos = next;
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                let (name, next) = read_name(chars, pos + 1);
                if name.is_empty() {
                    return Err("empty id".to_string());
                }
                compound.id = Some(name);
                pos = next;
            }
            '.' => {
                let (name, next) = read_name(chars, pos + 1);
                if name.is_empty() {
                    return Err("empty class".to_string());
                }
                compound.classes.push(name);
                pos = next;
            }
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|&c| c == ']')
                    .map(|offset| pos + offset)
                    .ok_or_else(|| "unclosed '['".to_string())?;
                compound.attributes.push(parse_attribute(&chars[pos + 1..close])?);
                pos = close + 1;
            }
            c if c.is_whitespace() || c == '>' => break,
            c => return Err(format!("unsupported character {c:?}")),
        }
    }

    if compound.is_empty() {
        return Err("empty compound selector".to_string());
    }
    Ok((compound, pos))
}

fn parse_attribute(body: &[char]) -> Result<AttributeMatch, String> {
    let body: String = body.iter().collect();
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(format!("invalid attribute name {name:?}"));
    }
    Ok(AttributeMatch {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Fake {
        tag: &'static str,
        classes: Vec<&'static str>,
        attributes: Vec<(&'static str, &'static str)>,
        parent: Option<Box<Fake>>,
    }

    impl Fake {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                classes: vec![],
                attributes: vec![],
                parent: None,
            }
        }

        fn class(mut self, class: &'static str) -> Self {
            self.classes.push(class);
            self
        }

        fn attr(mut self, name: &'static str, value: &'static str) -> Self {
            self.attributes.push((name, value));
            self
        }

        fn under(mut self, parent: Fake) -> Self {
            self.parent = Some(Box::new(parent));
            self
        }
    }

    impl SelectorTarget for Fake {
        fn tag_name(&self) -> String {
            self.tag.to_string()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
        }

        fn parent(&self) -> Option<Self> {
            self.parent.as_deref().cloned()
        }
    }

    fn matches(selector: &str, node: &Fake) -> bool {
        Selector::parse(selector).unwrap().matches(node)
    }

    #[test]
    fn test_tag_and_class() {
        let node = Fake::new("ul").class("pagination");
        assert!(matches("ul", &node));
        assert!(matches("UL", &node));
        assert!(matches(".pagination", &node));
        assert!(matches("ul.pagination", &node));
        assert!(!matches("ol.pagination", &node));
        assert!(!matches("ul.pagination.active", &node));
        assert!(matches("*", &node));
    }

    #[test]
    fn test_id_and_attributes() {
        let node = Fake::new("a").attr("id", "dups").attr("data-index", "3");
        assert!(matches("#dups", &node));
        assert!(matches("a[data-index]", &node));
        assert!(matches("a[data-index=3]", &node));
        assert!(matches("a[data-index=\"3\"]", &node));
        assert!(!matches("a[data-index=4]", &node));
        assert!(!matches("a[href]", &node));
    }

    #[test]
    fn test_child_combinator() {
        let tr = Fake::new("tr").under(Fake::new("thead").under(Fake::new("table")));
        assert!(matches("table > thead > tr", &tr));
        assert!(matches("thead>tr", &tr));
        assert!(!matches("table > tr", &tr));
        assert!(!matches("tbody > tr", &tr));
    }

    #[test]
    fn test_descendant_combinator() {
        let a = Fake::new("a").class("active").under(
            Fake::new("li").under(Fake::new("ul").class("pagination")),
        );
        assert!(matches("ul a.active", &a));
        assert!(matches(".pagination  li > a", &a));
        assert!(!matches("ol a", &a));
    }

    #[test]
    fn test_invalid_selectors() {
        for source in ["", "  ", "> a", "a >", "a > > b", ".", "#", "a[", "a[=x]", "a:hover", "a,b"] {
            assert!(
                matches!(Selector::parse(source), Err(DashboardError::InvalidSelector(_))),
                "expected {source:?} to be rejected"
            );
        }
    }
}
