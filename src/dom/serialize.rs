use super::document::NodeData;
use super::{Document, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Markup for `id` and its subtree. Live form values are not reflected,
    /// matching how browsers serialize.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Markup of the whole connected tree.
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let element = match &node.data {
            NodeData::Text(text) => {
                escape_into(text, false, out);
                return;
            }
            NodeData::Root | NodeData::Fragment => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
                return;
            }
            NodeData::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            out.push_str(" />");
            return;
        }
        out.push('>');
        if let Some(content) = element.content {
            self.write_node(content, out);
        }
        for child in &node.children {
            self.write_node(*child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn escape_into(raw: &str, attribute: bool, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_document;

    #[test]
    fn serializes_templates_and_void_elements() {
        let source = r#"<div id="app"><template id="t"><p class="x">a &amp; b</p></template><input id="i" value="&quot;q&quot;" /></div>"#;
        let doc = parse_document(source).unwrap();
        let app = doc.get_element_by_id("app").unwrap();
        assert_eq!(doc.outer_html(app), source);
    }

    #[test]
    fn output_parses_back_to_the_same_markup() {
        let doc = parse_document(r#"<ul id="list"><li>one</li><li>two &lt; three</li></ul>"#).unwrap();
        let html = doc.to_html();
        let reparsed = parse_document(&html).unwrap();
        assert_eq!(reparsed.to_html(), html);
    }
}
