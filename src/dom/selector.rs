use std::sync::LazyLock;

use regex::Regex;

use super::{Document, DomError, NodeId};

static COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<tag>\*|[A-Za-z][A-Za-z0-9-]*)?(?P<rest>(?:[#.][A-Za-z_][\w-]*)*)$")
        .expect("compound selector pattern")
});

static SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([#.])([A-Za-z_][\w-]*)").expect("simple selector pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(raw: &str) -> Option<Self> {
        let captures = COMPOUND.captures(raw)?;
        let tag = captures
            .name("tag")
            .map(|tag| tag.as_str())
            .filter(|tag| *tag != "*")
            .map(str::to_ascii_lowercase);
        let mut id = None;
        let mut classes = Vec::new();
        let rest = captures.name("rest").map_or("", |rest| rest.as_str());
        for part in SIMPLE.captures_iter(rest) {
            let name = part[2].to_string();
            if &part[1] == "#" {
                id = Some(name);
            } else {
                classes.push(name);
            }
        }
        Some(Self { tag, id, classes })
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|expected| expected != tag) {
            return false;
        }
        if let Some(id) = &self.id
            && doc.element_id(node) != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| doc.has_class(node, class))
    }
}

/// A parsed CSS selector.
///
/// Supports type, `#id`, `.class` and universal selectors, compounds of
/// those, the descendant combinator and comma-separated lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(raw.to_string());
        let mut alternatives = Vec::new();
        for group in raw.split(',') {
            let compounds = group
                .split_whitespace()
                .map(Compound::parse)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?;
            if compounds.is_empty() {
                return Err(invalid());
            }
            alternatives.push(compounds);
        }
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|compounds| matches_chain(doc, node, compounds))
    }
}

fn matches_chain(doc: &Document, node: NodeId, compounds: &[Compound]) -> bool {
    let Some((last, ancestors)) = compounds.split_last() else {
        return false;
    };
    if !last.matches(doc, node) {
        return false;
    }
    let mut current = doc.parent(node);
    for compound in ancestors.iter().rev() {
        loop {
            let Some(candidate) = current else {
                return false;
            };
            current = doc.parent(candidate);
            if compound.matches(doc, candidate) {
                break;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.create_element("section");
        doc.set_attribute(section, "class", "projects").unwrap();
        let header = doc.create_element("header");
        let heading = doc.create_element("h2");
        let list = doc.create_element("ul");
        doc.set_id(list, "active-projects-list").unwrap();
        doc.append_child(doc.root(), section).unwrap();
        doc.append_child(section, header).unwrap();
        doc.append_child(header, heading).unwrap();
        doc.append_child(section, list).unwrap();
        (doc, section, heading, list)
    }

    #[test]
    fn matches_type_id_and_class() {
        let (doc, section, heading, list) = page();
        let root = doc.root();
        assert_eq!(doc.query_selector(root, "h2").unwrap(), Some(heading));
        assert_eq!(
            doc.query_selector(root, "#active-projects-list").unwrap(),
            Some(list)
        );
        assert_eq!(
            doc.query_selector(root, "section.projects").unwrap(),
            Some(section)
        );
        assert_eq!(doc.query_selector(root, "ul.projects").unwrap(), None);
    }

    #[test]
    fn descendant_combinator_walks_ancestors() {
        let (doc, _, heading, list) = page();
        let root = doc.root();
        assert_eq!(
            doc.query_selector(root, "section header h2").unwrap(),
            Some(heading)
        );
        assert_eq!(doc.query_selector(root, "header ul").unwrap(), None);
        assert_eq!(
            doc.query_selector_all(root, "h2, ul").unwrap(),
            vec![heading, list]
        );
    }

    #[test]
    fn query_is_scoped_to_descendants() {
        let (doc, section, _, _) = page();
        assert_eq!(doc.query_selector(section, "section").unwrap(), None);
    }

    #[test]
    fn rejects_unsupported_syntax() {
        for raw in ["", "  ", "ul > li", "[for=title]", "#1abc", "a,"] {
            assert!(
                matches!(Selector::parse(raw), Err(DomError::InvalidSelector(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
