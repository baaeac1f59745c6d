use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::{info, warn};

use crate::component::{Component, ComponentBase, MountOptions, StructuralError, mount};
use crate::config::{FieldsConfig, InputConfig, Messages, NumericCoercion};
use crate::dom::{Document, DomError, EventType, ListenerHandle, NodeId};
use crate::validation::{Validatable, ValidationRules, validate};

use super::model::ProjectRecord;
use super::notify::{Notifier, RecordSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    Manday,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Description, FormField::Manday];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Manday => "manday",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    RequiredFieldEmpty,
    InvalidInput,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::RequiredFieldEmpty => f.write_str("required field is empty"),
            RejectionReason::InvalidInput => f.write_str("invalid input"),
        }
    }
}

/// A submission that failed validation. Entered values stay in the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationRejection {
    pub field: FormField,
    pub reason: RejectionReason,
}

impl ValidationRejection {
    fn classify(field: FormField, value: &Validatable, rules: &ValidationRules) -> Self {
        let reason = if rules.is_required() && value.to_string().trim().is_empty() {
            RejectionReason::RequiredFieldEmpty
        } else {
            RejectionReason::InvalidInput
        };
        Self { field, reason }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(ProjectRecord),
    Rejected(ValidationRejection),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// The form and its three controls inside a rendered input component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormControls {
    pub form: NodeId,
    pub title: NodeId,
    pub description: NodeId,
    pub manday: NodeId,
}

impl FormControls {
    pub fn control(&self, field: FormField) -> NodeId {
        match field {
            FormField::Title => self.title,
            FormField::Description => self.description,
            FormField::Manday => self.manday,
        }
    }
}

/// Reads, validates and emits one submission of the form.
pub struct SubmitHandler {
    controls: FormControls,
    fields: FieldsConfig,
    coercion: NumericCoercion,
    messages: Messages,
    notifier: Rc<dyn Notifier>,
    sink: Rc<dyn RecordSink>,
    last_outcome: RefCell<Option<SubmitOutcome>>,
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("controls", &self.controls)
            .field("coercion", &self.coercion)
            .field("last_outcome", &self.last_outcome)
            .finish_non_exhaustive()
    }
}

impl SubmitHandler {
    /// Run the submission flow against the current control values.
    ///
    /// A rejection alerts the notifier and leaves the form untouched; an
    /// accepted record goes to the sink before the controls are cleared.
    pub fn handle(&self, doc: &mut Document) -> SubmitOutcome {
        let outcome = match self.gather(doc) {
            Ok(record) => {
                info!(
                    title = %record.title,
                    description = %record.description,
                    manday = record.manday,
                    "submission accepted"
                );
                self.sink.accept(doc, record.clone());
                if let Err(err) = self.clear(doc) {
                    warn!(error = %err, "failed to clear form controls");
                }
                SubmitOutcome::Accepted(record)
            }
            Err(rejection) => {
                warn!(field = %rejection.field, reason = %rejection.reason, "submission rejected");
                self.notifier.alert(self.message_for(rejection.reason));
                SubmitOutcome::Rejected(rejection)
            }
        };
        *self.last_outcome.borrow_mut() = Some(outcome.clone());
        outcome
    }

    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome.borrow().clone()
    }

    pub fn take_last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome.borrow_mut().take()
    }

    pub fn controls(&self) -> FormControls {
        self.controls
    }

    fn gather(&self, doc: &Document) -> Result<ProjectRecord, ValidationRejection> {
        let title = self.read(doc, FormField::Title);
        let description = self.read(doc, FormField::Description);
        let manday_text = self.read(doc, FormField::Manday);

        self.check(FormField::Title, Validatable::Text(title.clone()))?;
        self.check(FormField::Description, Validatable::Text(description.clone()))?;
        let manday = match self.coercion {
            NumericCoercion::Strict => {
                let parsed = manday_text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite());
                let Some(number) = parsed else {
                    return Err(ValidationRejection::classify(
                        FormField::Manday,
                        &Validatable::Text(manday_text),
                        &self.fields.manday.rules,
                    ));
                };
                self.check(FormField::Manday, Validatable::Number(number))?;
                number
            }
            NumericCoercion::Lenient => {
                self.check(FormField::Manday, Validatable::Text(manday_text.clone()))?;
                coerce_lenient(&manday_text)
            }
        };

        Ok(ProjectRecord {
            title,
            description,
            manday,
        })
    }

    fn check(&self, field: FormField, value: Validatable) -> Result<(), ValidationRejection> {
        let rules = self.rules(field);
        if validate(&value, rules) {
            Ok(())
        } else {
            Err(ValidationRejection::classify(field, &value, rules))
        }
    }

    fn rules(&self, field: FormField) -> &ValidationRules {
        match field {
            FormField::Title => &self.fields.title.rules,
            FormField::Description => &self.fields.description.rules,
            FormField::Manday => &self.fields.manday.rules,
        }
    }

    fn read(&self, doc: &Document, field: FormField) -> String {
        doc.value(self.controls.control(field)).unwrap_or_default()
    }

    fn clear(&self, doc: &mut Document) -> Result<(), DomError> {
        for field in FormField::ALL {
            doc.set_value(self.controls.control(field), "")?;
        }
        Ok(())
    }

    fn message_for(&self, reason: RejectionReason) -> &str {
        match reason {
            RejectionReason::RequiredFieldEmpty => &self.messages.required_field_empty,
            RejectionReason::InvalidInput => &self.messages.invalid_input,
        }
    }
}

/// Coerce text to a number with JavaScript `Number(text)` rules: blank text
/// is zero, `Infinity` is spelled out, `0x`/`0o`/`0b` literals are accepted
/// unsigned, and anything else that is not a plain decimal is NaN.
fn coerce_lenient(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(value) = radix_literal(trimmed) {
        return value;
    }
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    let decimal = unsigned.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.')
        && unsigned
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |value| sign * value)
}

/// `0x1F`, `0o17`, `0b101`. A recognised prefix with bad digits is NaN.
fn radix_literal(text: &str) -> Option<f64> {
    const PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    let (digits, radix) = PREFIXES
        .iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|digits| (digits, *radix)))?;
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// The project entry form.
#[derive(Debug)]
pub struct ProjectInput {
    base: ComponentBase,
    handler: Rc<SubmitHandler>,
    labels: [String; 3],
    listener: Option<ListenerHandle>,
}

impl ProjectInput {
    pub fn mount(
        doc: &mut Document,
        config: &InputConfig,
        host: &str,
        notifier: Rc<dyn Notifier>,
        sink: Rc<dyn RecordSink>,
    ) -> Result<Self, StructuralError> {
        let options = MountOptions::new(config.template.as_str(), host, config.position)
            .with_element_id(config.element_id.as_str());
        mount(doc, &options, |doc, base| {
            let fields = &config.fields;
            let controls = FormControls {
                form: base.element(),
                title: base.part(doc, &fields.title.selector)?,
                description: base.part(doc, &fields.description.selector)?,
                manday: base.part(doc, &fields.manday.selector)?,
            };
            let labels = [
                resolve_label(doc, &base, controls.title, fields.title.label.as_deref(), FormField::Title),
                resolve_label(
                    doc,
                    &base,
                    controls.description,
                    fields.description.label.as_deref(),
                    FormField::Description,
                ),
                resolve_label(doc, &base, controls.manday, fields.manday.label.as_deref(), FormField::Manday),
            ];
            let handler = SubmitHandler {
                controls,
                fields: fields.clone(),
                coercion: config.coercion,
                messages: config.messages.clone(),
                notifier,
                sink,
                last_outcome: RefCell::new(None),
            };
            Ok(Self {
                base,
                handler: Rc::new(handler),
                labels,
                listener: None,
            })
        })
    }

    pub fn submit_handler(&self) -> Rc<SubmitHandler> {
        Rc::clone(&self.handler)
    }

    pub fn controls(&self) -> FormControls {
        self.handler.controls
    }

    pub fn label(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.labels[0],
            FormField::Description => &self.labels[1],
            FormField::Manday => &self.labels[2],
        }
    }

    pub fn listener(&self) -> Option<ListenerHandle> {
        self.listener
    }
}

impl Component for ProjectInput {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self, doc: &mut Document) -> Result<(), StructuralError> {
        let handler = Rc::clone(&self.handler);
        let handle = doc.add_event_listener(self.element(), EventType::Submit, move |doc, event| {
            event.prevent_default();
            handler.handle(doc);
        })?;
        self.listener = Some(handle);
        Ok(())
    }
}

/// Configured label, else the text of the `<label for=..>` naming the
/// control, else the field name.
fn resolve_label(
    doc: &Document,
    base: &ComponentBase,
    control: NodeId,
    configured: Option<&str>,
    field: FormField,
) -> String {
    if let Some(label) = configured {
        return label.to_string();
    }
    let from_markup = doc.element_id(control).and_then(|id| {
        doc.query_selector_all(base.element(), "label")
            .ok()?
            .into_iter()
            .find(|label| doc.attribute(*label, "for") == Some(id))
            .map(|label| doc.text_content(label).trim().to_string())
    });
    from_markup
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| field.as_str().to_string())
}
