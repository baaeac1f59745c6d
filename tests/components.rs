use projectboard::component::{Component, ComponentBase, MountOptions, StructuralError, mount};
use projectboard::dom::{Document, EventType, InsertPosition, NodeId, parse_document};

const MARKUP: &str = r#"<html><body>
  <template id="badge"><span class="badge"><b></b></span></template>
  <div id="host"><p>existing</p></div>
</body></html>"#;

#[derive(Debug)]
struct Badge {
    base: ComponentBase,
    label: NodeId,
    text: String,
}

impl Component for Badge {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        doc.add_event_listener(self.element(), EventType::Click, |doc, event| {
            let node = event.current_target();
            let _ = doc.set_attribute(node, "data-clicked", "yes");
        })?;
        Ok(())
    }

    fn render_content(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        doc.set_text_content(self.label, &self.text)?;
        Ok(())
    }
}

fn badge(doc: &mut Document, position: InsertPosition, text: &str) -> Result<Badge, StructuralError> {
    let options = MountOptions::new("badge", "host", position);
    mount(doc, &options, |doc, base| {
        Ok(Badge {
            label: base.part(doc, "b")?,
            base,
            text: text.to_string(),
        })
    })
}

#[test]
fn custom_components_mount_render_and_listen() {
    let mut doc = parse_document(MARKUP).unwrap();
    let first = badge(&mut doc, InsertPosition::BeforeEnd, "one").unwrap();
    let second = badge(&mut doc, InsertPosition::AfterBegin, "two").unwrap();

    let host = doc.get_element_by_id("host").unwrap();
    let children = doc.element_children(host);
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], second.element());
    assert_eq!(children[2], first.element());
    assert_eq!(doc.text_content(first.element()), "one");
    assert_eq!(first.base().host(), host);

    doc.dispatch_event(first.label, EventType::Click).unwrap();
    assert_eq!(doc.attribute(first.element(), "data-clicked"), Some("yes"));
    assert_eq!(doc.attribute(second.element(), "data-clicked"), None);
}

#[test]
fn template_stays_pristine_after_mounting() {
    let mut doc = parse_document(MARKUP).unwrap();
    let before = doc.node_count();
    badge(&mut doc, InsertPosition::BeforeEnd, "one").unwrap();

    let template = doc.get_element_by_id("badge").unwrap();
    let content = doc.template_content(template).unwrap();
    let source = doc.first_element_child(content).unwrap();
    assert_eq!(doc.text_content(source), "");
    assert!(doc.node_count() > before);
}

#[test]
fn structural_errors_are_typed() {
    let mut doc = parse_document(MARKUP).unwrap();
    let err = mount(
        &mut doc,
        &MountOptions::new("missing", "host", InsertPosition::BeforeEnd),
        |doc, base| {
            Ok(Badge {
                label: base.part(doc, "b")?,
                base,
                text: String::new(),
            })
        },
    )
    .unwrap_err();
    assert_eq!(err, StructuralError::TemplateNotFound("missing".into()));

    assert!(badge(&mut doc, InsertPosition::BeforeBegin, "x").is_ok());

    let err = mount(
        &mut doc,
        &MountOptions::new("badge", "host", InsertPosition::BeforeEnd),
        |doc, base| {
            Ok(Badge {
                label: base.part(doc, "i")?,
                base,
                text: String::new(),
            })
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        StructuralError::PartNotFound {
            template: "badge".into(),
            selector: "i".into(),
        }
    );
}
