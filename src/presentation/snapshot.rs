use crate::board::{FormField, ProjectBoard, ProjectStatus};
use crate::component::Component;

/// What the terminal shows, read back from the rendered document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub fields: Vec<FieldView>,
    pub lists: Vec<ListView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub field: FormField,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub status: ProjectStatus,
    pub heading: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub effort: String,
    pub description: String,
}

impl PageView {
    pub fn capture(board: &ProjectBoard) -> Self {
        let doc = board.document();
        let fields = board
            .input()
            .map(|input| {
                FormField::ALL
                    .into_iter()
                    .map(|field| FieldView {
                        field,
                        label: input.label(field).to_string(),
                        value: board.field_text(field).unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let lists = board
            .lists()
            .iter()
            .map(|list| {
                let heading = doc
                    .query_selector(list.element(), "h2")
                    .ok()
                    .flatten()
                    .map(|node| doc.text_content(node))
                    .unwrap_or_else(|| list.heading().to_string());
                let items = list
                    .item_elements()
                    .into_iter()
                    .map(|item| {
                        let text = |selector: &str| {
                            doc.query_selector(item, selector)
                                .ok()
                                .flatten()
                                .map(|node| doc.text_content(node))
                                .unwrap_or_default()
                        };
                        ItemView {
                            id: doc.element_id(item).unwrap_or_default().to_string(),
                            title: text("h2"),
                            effort: text("h3"),
                            description: text("p"),
                        }
                    })
                    .collect();
                ListView {
                    status: list.status(),
                    heading,
                    items,
                }
            })
            .collect();

        Self { fields, lists }
    }

    pub fn item(&self, id: &str) -> Option<&ItemView> {
        self.lists
            .iter()
            .flat_map(|list| list.items.iter())
            .find(|item| item.id == id)
    }
}
