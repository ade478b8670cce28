//! Entity Form Controller
//!
//! Controlled field values, validation, line items with a derived total,
//! status-based edit locks, and the submit/cancel lifecycle.
//!
//! Like the list controller, the form never awaits on its own in the UI:
//! [`FormController::begin_submit`] hands out the composed payload and
//! [`FormController::finish_submit`] applies the collaborator's answer.

use std::collections::BTreeMap;

use chrono::Datelike;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::format;
use crate::line_item::{self, LineItem, LineItemField, LineItemKind, ReferenceCatalog};
use crate::payload::{FieldValue, Payload};
use crate::router::ViewEvent;
use crate::source::{DataSource, Notifier, NotifyLevel};
use crate::status::{normalize_key, Status};

/// Field name -> error message
pub type FieldErrors = BTreeMap<String, String>;

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Integer,
    Decimal,
    Date,
    Time,
    Bool,
    /// One of a fixed option list (compared case-insensitively)
    Choice(&'static [&'static str]),
    /// Id of another record
    Reference,
}

/// Range/shape rule checked after the value parses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    None,
    /// Number strictly greater than zero
    Positive,
    /// Number zero or greater
    NonNegative,
    /// Model year between 1900 and next year
    Year,
    ExactLength(usize),
    MinLength(usize),
}

/// Declarative description of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub rule: Rule,
    /// Statuses in which an existing record's field is read-only
    pub locked_in: &'static [Status],
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            rule: Rule::None,
            locked_in: &[],
        }
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn rule(self, rule: Rule) -> Self {
        Self { rule, ..self }
    }

    pub const fn locked_in(self, statuses: &'static [Status]) -> Self {
        Self { locked_in: statuses, ..self }
    }
}

/// Separate date and time inputs submitted as one timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeJoin {
    pub date: &'static str,
    pub time: &'static str,
    pub target: &'static str,
}

/// Form layout and rules for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    /// Singular resource name for messages ("purchase order")
    pub resource: &'static str,
    pub fields: &'static [FieldSpec],
    /// Statuses in which the whole record is read-only
    pub record_locks: &'static [Status],
    pub joins: &'static [DateTimeJoin],
    pub line_items: bool,
    pub min_line_items: usize,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn join_for(&self, name: &str) -> Option<&DateTimeJoin> {
        self.joins.iter().find(|j| j.date == name || j.time == name)
    }
}

/// Records that have a create/edit form
pub trait Editable: Entity {
    fn schema() -> &'static FormSchema;

    /// Raw input value for every schema field
    fn seed_fields(&self) -> BTreeMap<&'static str, String>;

    fn seed_line_items(&self) -> Vec<LineItem> {
        Vec::new()
    }

    /// Status consulted by record and field locks
    fn lock_status(&self) -> Option<Status> {
        None
    }

    /// Initial values of a blank create form
    fn defaults() -> BTreeMap<&'static str, String> {
        BTreeMap::new()
    }

    /// Status that forbids editing this record at all
    fn edit_block(&self) -> Option<Status> {
        let status = self.lock_status()?;
        Self::schema().record_locks.contains(&status).then_some(status)
    }
}

/// Create or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit { id: Id, status: Option<Status> },
}

/// Save call the caller should perform
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket<Id> {
    pub target: FormMode<Id>,
    pub payload: Payload,
}

impl<Id: Copy> SubmitTicket<Id> {
    /// Run the create/update call this ticket describes
    pub async fn execute<T, S>(&self, source: &S) -> CoreResult<T>
    where
        T: Entity<Id = Id>,
        S: DataSource<T> + ?Sized,
    {
        match self.target {
            FormMode::Create => source.create(&self.payload).await,
            FormMode::Edit { id, .. } => source.update(id, &self.payload).await,
        }
    }
}

/// Per-form state
#[derive(Debug, Clone)]
pub struct FormController<T: Editable> {
    mode: FormMode<T::Id>,
    fields: BTreeMap<&'static str, String>,
    errors: FieldErrors,
    line_items: Vec<LineItem>,
    total: Decimal,
    recomputes: u64,
    catalog: ReferenceCatalog,
    submitting: bool,
}

impl<T: Editable> FormController<T> {
    /// Blank create-mode form
    pub fn create() -> Self {
        let mut fields: BTreeMap<&'static str, String> =
            T::schema().fields.iter().map(|f| (f.name, String::new())).collect();
        fields.extend(T::defaults());
        Self {
            mode: FormMode::Create,
            fields,
            errors: FieldErrors::new(),
            line_items: Vec::new(),
            total: Decimal::ZERO,
            recomputes: 0,
            catalog: ReferenceCatalog::new(),
            submitting: false,
        }
    }

    /// Edit-mode form seeded from `item`. Fails for records whose status
    /// forbids editing.
    pub fn edit(item: &T) -> CoreResult<Self> {
        if let Some(status) = item.edit_block() {
            return Err(CoreError::Conflict { status });
        }
        let mut fields: BTreeMap<&'static str, String> =
            T::schema().fields.iter().map(|f| (f.name, String::new())).collect();
        fields.extend(item.seed_fields());
        let line_items = item.seed_line_items();
        Ok(Self {
            mode: FormMode::Edit {
                id: item.id(),
                status: item.lock_status(),
            },
            fields,
            errors: FieldErrors::new(),
            total: seeded_total(&line_items),
            line_items,
            recomputes: 0,
            catalog: ReferenceCatalog::new(),
            submitting: false,
        })
    }

    /// Form for a router state: `None` is create mode
    pub fn for_editing(item: Option<&T>) -> CoreResult<Self> {
        match item {
            Some(item) => Self::edit(item),
            None => Ok(Self::create()),
        }
    }

    pub fn with_catalog(mut self, catalog: ReferenceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn set_catalog(&mut self, catalog: ReferenceCatalog) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn schema(&self) -> &'static FormSchema {
        T::schema()
    }

    pub fn mode(&self) -> &FormMode<T::Id> {
        &self.mode
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, FormMode::Create)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Σ quantity × unit rate over the current line items
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// How many times the total has been recomputed
    pub fn total_revisions(&self) -> u64 {
        self.recomputes
    }

    // ========================
    // Fields
    // ========================

    /// Status that makes `name` read-only for the record being edited
    pub fn field_lock(&self, name: &str) -> Option<Status> {
        let FormMode::Edit { status: Some(status), .. } = &self.mode else {
            return None;
        };
        let spec = T::schema().field(name)?;
        spec.locked_in.contains(status).then_some(*status)
    }

    /// Update one field and clear its error
    pub fn set_field(&mut self, name: &str, value: &str, notifier: &impl Notifier) -> CoreResult<()> {
        let schema = T::schema();
        let Some(spec) = schema.field(name) else {
            return Err(CoreError::invalid_input(name, "unknown field"));
        };
        if let Some(status) = self.field_lock(name) {
            notifier.notify(
                NotifyLevel::Warning,
                &format!(
                    "{} cannot be changed while the {} is {}.",
                    spec.label,
                    schema.resource,
                    status.label().to_lowercase()
                ),
            );
            return Err(CoreError::Conflict { status });
        }
        self.fields.insert(spec.name, value.to_string());
        self.errors.remove(name);
        Ok(())
    }

    // ========================
    // Line items
    // ========================

    /// Append a zero-quantity row; returns its index
    pub fn add_line_item(&mut self, kind: LineItemKind) -> usize {
        self.line_items.push(LineItem::new(kind));
        self.errors.remove("lineItems");
        self.recompute();
        self.line_items.len() - 1
    }

    pub fn remove_line_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.line_items.len() {
            return Err(CoreError::invalid_input(
                "lineItems",
                format!("no line item at position {}", index),
            ));
        }
        let removed = self.line_items.remove(index);
        // Row errors are keyed by position; they no longer line up
        self.errors.retain(|k, _| !k.starts_with("lineItems["));
        self.recompute();
        Ok(removed)
    }

    /// Update one column of one row. Selecting a reference fills in the
    /// unit rate and description from the catalog.
    pub fn update_line_item(&mut self, index: usize, field: LineItemField, value: &str) -> CoreResult<()> {
        let key = field.error_key(index);
        let Some(row) = self.line_items.get(index) else {
            return Err(CoreError::invalid_input(
                "lineItems",
                format!("no line item at position {}", index),
            ));
        };
        let mut row = row.clone();

        let applied = match field {
            LineItemField::Kind => LineItemKind::from_str(value)
                .map(|kind| {
                    if kind == LineItemKind::Labor {
                        row.reference_id = None;
                    }
                    row.kind = kind;
                })
                .ok_or("Choose part or labor"),
            LineItemField::Reference => {
                let value = value.trim();
                if value.is_empty() {
                    row.reference_id = None;
                    Ok(())
                } else {
                    value
                        .parse::<u32>()
                        .map(|id| {
                            row.reference_id = Some(id);
                            match self.catalog.get(id) {
                                Some(entry) => {
                                    row.unit_rate = entry.unit_rate;
                                    row.description = entry.name.clone();
                                }
                                None => warn!("[FORM] reference {} is not in the catalog", id),
                            }
                        })
                        .map_err(|_| "Select a part")
                }
            }
            LineItemField::Description => {
                row.description = value.to_string();
                Ok(())
            }
            LineItemField::Quantity => value
                .trim()
                .parse::<u32>()
                .map(|q| row.quantity = q)
                .map_err(|_| "Quantity must be a whole number"),
            LineItemField::UnitRate => match format::parse_decimal(value) {
                Some(rate) if rate.is_sign_negative() && !rate.is_zero() => Err("Rate cannot be negative"),
                Some(rate) => {
                    row.unit_rate = rate;
                    Ok(())
                }
                None => Err("Rate must be a number"),
            },
        };

        let applied = applied.and_then(|()| {
            let mut candidate = self.line_items.clone();
            candidate[index] = row.clone();
            line_item::total(&candidate).map(|_| ()).ok_or("Amount too large")
        });

        match applied {
            Ok(()) => {
                self.line_items[index] = row;
                self.errors.remove(&key);
                self.recompute();
                Ok(())
            }
            Err(message) => {
                self.errors.insert(key.clone(), message.to_string());
                Err(CoreError::invalid_input(key, message))
            }
        }
    }

    fn recompute(&mut self) {
        self.total = seeded_total(&self.line_items);
        self.recomputes += 1;
    }

    // ========================
    // Validation
    // ========================

    /// Every field error for the current values; empty when valid.
    /// Pure: does not touch stored errors.
    pub fn validate(&self) -> FieldErrors {
        let schema = T::schema();
        let mut errors = FieldErrors::new();

        for spec in schema.fields {
            if let Some(message) = validate_field(spec, self.field(spec.name)) {
                errors.insert(spec.name.to_string(), message);
            }
        }

        if schema.line_items {
            if self.line_items.len() < schema.min_line_items {
                errors.insert("lineItems".to_string(), "Add at least one line item".to_string());
            }
            for (i, row) in self.line_items.iter().enumerate() {
                if row.quantity == 0 {
                    errors.insert(LineItemField::Quantity.error_key(i), "Quantity must be at least 1".to_string());
                }
                if row.unit_rate.is_sign_negative() && !row.unit_rate.is_zero() {
                    errors.insert(LineItemField::UnitRate.error_key(i), "Rate cannot be negative".to_string());
                }
                match row.kind {
                    LineItemKind::Part if row.reference_id.is_none() => {
                        errors.insert(LineItemField::Reference.error_key(i), "Select a part".to_string());
                    }
                    LineItemKind::Labor if row.description.trim().is_empty() => {
                        errors.insert(LineItemField::Description.error_key(i), "Describe the labor".to_string());
                    }
                    _ => {}
                }
            }
        }

        errors
    }

    /// Validate and convert the field values into the save payload
    pub fn compose(&self) -> Result<Payload, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let schema = T::schema();
        let mut payload = Payload::new();
        for spec in schema.fields {
            if schema.join_for(spec.name).is_some() {
                continue;
            }
            payload
                .fields
                .insert(spec.name.to_string(), typed_value(spec, self.field(spec.name)));
        }
        for join in schema.joins {
            let value = FieldValue::optional(
                format::combine_date_time(self.field(join.date), self.field(join.time)),
                FieldValue::DateTime,
            );
            payload.fields.insert(join.target.to_string(), value);
        }
        if schema.line_items {
            payload.line_items = Some(self.line_items.clone());
            payload.total = Some(self.total);
        }
        Ok(payload)
    }

    // ========================
    // Lifecycle
    // ========================

    /// Validate and hand out the save call. On validation failure the errors
    /// are stored and nothing is returned; no request must be made.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket<T::Id>> {
        if self.submitting {
            debug!("[FORM:{}] submit already in flight", T::schema().resource);
            return None;
        }
        match self.compose() {
            Ok(payload) => {
                self.errors.clear();
                self.submitting = true;
                Some(SubmitTicket {
                    target: self.mode.clone(),
                    payload,
                })
            }
            Err(errors) => {
                debug!("[FORM:{}] {} validation errors", T::schema().resource, errors.len());
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the save result. Success clears the form and returns the event
    /// that sends the router back to the list; failure keeps every value.
    pub fn finish_submit(&mut self, result: CoreResult<T>, notifier: &impl Notifier) -> Option<ViewEvent<T>> {
        self.submitting = false;
        let resource = T::schema().resource;
        match result {
            Ok(saved) => {
                let verb = if self.is_create() { "created" } else { "updated" };
                notifier.notify(NotifyLevel::Success, &format!("{} {}", saved.title(), verb));
                self.reset();
                Some(ViewEvent::Saved(saved))
            }
            Err(CoreError::Conflict { status }) => {
                notifier.notify(
                    NotifyLevel::Warning,
                    &format!("This {} is {} and can no longer be edited.", resource, status.label().to_lowercase()),
                );
                None
            }
            Err(err) => {
                warn!("[FORM:{}] save failed: {}", resource, err);
                notifier.notify(NotifyLevel::Error, &format!("Could not save {}: {}", resource, err));
                None
            }
        }
    }

    /// Validate, save through `source`, and apply the result
    pub async fn submit<S>(&mut self, source: &S, notifier: &impl Notifier) -> Option<ViewEvent<T>>
    where
        S: DataSource<T> + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let result = ticket.execute(source).await;
        self.finish_submit(result, notifier)
    }

    /// Discard the form
    pub fn cancel(&mut self) -> ViewEvent<T> {
        self.reset();
        ViewEvent::Cancel
    }

    fn reset(&mut self) {
        let catalog = std::mem::take(&mut self.catalog);
        *self = Self::create().with_catalog(catalog);
    }
}

fn validate_field(spec: &FieldSpec, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return spec.required.then(|| format!("{} is required", spec.label));
    }

    let number: Option<Decimal> = match spec.kind {
        FieldKind::Text => None,
        FieldKind::Email => {
            if !is_email(value) {
                return Some("Enter a valid email address".to_string());
            }
            None
        }
        FieldKind::Phone => {
            if !is_phone(value) {
                return Some("Enter a valid phone number".to_string());
            }
            None
        }
        FieldKind::Integer => match format::parse_integer(value) {
            Some(n) => Some(Decimal::from(n)),
            None => return Some(format!("{} must be a whole number", spec.label)),
        },
        FieldKind::Decimal => match format::parse_decimal(value) {
            Some(d) => Some(d),
            None => return Some(format!("{} must be a number", spec.label)),
        },
        FieldKind::Date => {
            if format::parse_date(value).is_none() {
                return Some(format!("{} must use YYYY-MM-DD", spec.label));
            }
            None
        }
        FieldKind::Time => {
            if format::parse_time(value).is_none() {
                return Some(format!("{} must use HH:MM", spec.label));
            }
            None
        }
        FieldKind::Bool => {
            if parse_bool(value).is_none() {
                return Some(format!("{} must be yes or no", spec.label));
            }
            None
        }
        FieldKind::Choice(options) => {
            if match_choice(options, value).is_none() {
                return Some(format!("Choose a valid {}", spec.label.to_lowercase()));
            }
            None
        }
        FieldKind::Reference => {
            if value.parse::<u32>().is_err() {
                return Some(format!("Select a {}", spec.label.to_lowercase()));
            }
            None
        }
    };

    match (spec.rule, number) {
        (Rule::Positive, Some(n)) if n <= Decimal::ZERO => {
            Some(format!("{} must be greater than zero", spec.label))
        }
        (Rule::NonNegative, Some(n)) if n < Decimal::ZERO => Some(format!("{} cannot be negative", spec.label)),
        (Rule::Year, Some(n)) => {
            let max = chrono::Utc::now().year() + 1;
            let ok = n >= Decimal::from(1900) && n <= Decimal::from(max);
            (!ok).then(|| format!("{} must be between 1900 and {}", spec.label, max))
        }
        (Rule::ExactLength(len), _) if value.chars().count() != len => {
            Some(format!("{} must be {} characters", spec.label, len))
        }
        (Rule::MinLength(len), _) if value.chars().count() < len => {
            Some(format!("{} must be at least {} characters", spec.label, len))
        }
        _ => None,
    }
}

fn typed_value(spec: &FieldSpec, raw: &str) -> FieldValue {
    let value = raw.trim();
    if value.is_empty() {
        return FieldValue::Null;
    }
    match spec.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Phone => FieldValue::text(value),
        FieldKind::Integer | FieldKind::Reference => value
            .parse::<i64>()
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Null),
        FieldKind::Decimal => FieldValue::optional(format::parse_decimal(value), FieldValue::Decimal),
        FieldKind::Date => FieldValue::optional(format::parse_date(value), FieldValue::Date),
        FieldKind::Time => FieldValue::optional(
            format::parse_time(value).map(format::time_input_value),
            FieldValue::Text,
        ),
        FieldKind::Bool => FieldValue::optional(parse_bool(value), FieldValue::Bool),
        FieldKind::Choice(options) => FieldValue::optional(match_choice(options, value), FieldValue::text),
    }
}

/// Total of rows already accepted by the form. Edits that would overflow are
/// rejected, so only records seeded from the API can land here.
fn seeded_total(items: &[LineItem]) -> Decimal {
    line_item::total(items).unwrap_or_else(|| {
        warn!("[FORM] line item total overflows; showing zero");
        Decimal::ZERO
    })
}

/// Canonical option matching `value`, ignoring case and `-`/`_`/space differences
pub fn match_choice(options: &'static [&'static str], value: &str) -> Option<&'static str> {
    let key = normalize_key(value);
    options.iter().copied().find(|o| normalize_key(o) == key)
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn is_phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    allowed && value.chars().filter(char::is_ascii_digit).count() >= 7
}
