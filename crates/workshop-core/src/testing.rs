//! Test Doubles
//!
//! In-memory collaborators shared by the controller tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::entity::{Entity, Listable};
use crate::error::{CoreError, CoreResult};
use crate::page::{PageRequest, PageResult};
use crate::payload::Payload;
use crate::source::{Confirmer, DataSource, Notifier, NotifyLevel};

/// Minimal listable record
#[derive(Debug, Clone, PartialEq)]
pub struct Named {
    pub id: u32,
    pub name: String,
}

pub fn named(id: u32, name: &str) -> Named {
    Named { id, name: name.to_string() }
}

impl Entity for Named {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Listable for Named {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

type SaveFn<T> = Box<dyn Fn(&Payload) -> T>;

/// Vec-backed data source with call counters and one-shot failure injection
pub struct MemorySource<T: Listable> {
    records: RefCell<Vec<T>>,
    on_save: Option<SaveFn<T>>,
    saved: RefCell<Vec<Payload>>,
    fetches: Cell<usize>,
    deletes: Cell<usize>,
    fail_next: RefCell<Option<CoreError>>,
}

impl MemorySource<Named> {
    pub fn with_names(names: &[&str]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| named(i as u32 + 1, n))
                .collect(),
        )
    }
}

impl<T: Listable> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RefCell::new(records),
            on_save: None,
            saved: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
            deletes: Cell::new(0),
            fail_next: RefCell::new(None),
        }
    }

    /// Record returned by create/update
    pub fn on_save(mut self, f: impl Fn(&Payload) -> T + 'static) -> Self {
        self.on_save = Some(Box::new(f));
        self
    }

    pub fn fail_next(&self, message: &str) {
        *self.fail_next.borrow_mut() = Some(CoreError::network(message));
    }

    pub fn fail_next_with(&self, err: CoreError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.get()
    }

    /// Payloads passed to create/update, in call order
    pub fn saved(&self) -> Vec<Payload> {
        self.saved.borrow().clone()
    }

    pub fn remove(&self, id: T::Id) {
        self.records.borrow_mut().retain(|r| r.id() != id);
    }

    fn take_failure(&self) -> CoreResult<()> {
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn save(&self, payload: &Payload) -> CoreResult<T> {
        self.take_failure()?;
        self.saved.borrow_mut().push(payload.clone());
        let f = self
            .on_save
            .as_ref()
            .ok_or_else(|| CoreError::network("no save handler"))?;
        Ok(f(payload))
    }
}

#[async_trait(?Send)]
impl<T: Listable> DataSource<T> for MemorySource<T> {
    async fn fetch_page(&self, request: &PageRequest) -> CoreResult<PageResult<T>> {
        self.fetches.set(self.fetches.get() + 1);
        self.take_failure()?;
        let records = self.records.borrow();
        let size = request.page_size.max(1);
        let total_pages = records.len().div_ceil(size);
        let items = records
            .iter()
            .skip(request.page_index * size)
            .take(size)
            .cloned()
            .collect();
        Ok(PageResult {
            items,
            total_pages,
            total_elements: records.len(),
        })
    }

    async fn search(&self, query: &str) -> CoreResult<Vec<T>> {
        self.take_failure()?;
        let needle = query.to_lowercase();
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|r| r.search_fields().iter().any(|f| f.to_lowercase().contains(&needle)))
            .cloned()
            .collect())
    }

    async fn get(&self, id: T::Id) -> CoreResult<Option<T>> {
        self.take_failure()?;
        Ok(self.records.borrow().iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, payload: &Payload) -> CoreResult<T> {
        self.save(payload)
    }

    async fn update(&self, _id: T::Id, payload: &Payload) -> CoreResult<T> {
        self.save(payload)
    }

    async fn delete(&self, id: T::Id) -> CoreResult<()> {
        self.deletes.set(self.deletes.get() + 1);
        self.take_failure()?;
        self.remove(id);
        Ok(())
    }
}

/// Notifier that keeps every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(NotifyLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NotifyLevel, String)> {
        self.messages.borrow().clone()
    }

    pub fn count(&self, level: NotifyLevel) -> usize {
        self.messages.borrow().iter().filter(|(l, _)| *l == level).count()
    }

    pub fn last(&self) -> Option<(NotifyLevel, String)> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

/// Confirmer with a fixed answer that records its prompts
#[derive(Debug)]
pub struct ScriptedConfirm {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn yes() -> Self {
        Self { answer: true, prompts: RefCell::new(Vec::new()) }
    }

    pub fn no() -> Self {
        Self { answer: false, prompts: RefCell::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmer for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }
}
