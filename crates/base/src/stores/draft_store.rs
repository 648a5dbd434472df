use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

pub type DraftKey = String;
pub type DraftValue = String;

/// Key-scoped storage for serialized drafts of in-progress forms.
pub trait DraftStore {
    fn read_draft(&self, key: &str) -> Result<Option<DraftValue>>;
    fn write_draft(&mut self, key: &str, value: DraftValue) -> Result<()>;
    fn remove_draft(&mut self, key: &str) -> Result<()>;
}

impl<S: DraftStore + ?Sized> DraftStore for Box<S> {
    fn read_draft(&self, key: &str) -> Result<Option<DraftValue>> {
        (**self).read_draft(key)
    }

    fn write_draft(&mut self, key: &str, value: DraftValue) -> Result<()> {
        (**self).write_draft(key, value)
    }

    fn remove_draft(&mut self, key: &str) -> Result<()> {
        (**self).remove_draft(key)
    }
}

/// Lets several owners write into one store, e.g. the address form and the
/// equipment wizard of the same session.
impl<S: DraftStore> DraftStore for Rc<RefCell<S>> {
    fn read_draft(&self, key: &str) -> Result<Option<DraftValue>> {
        self.borrow().read_draft(key)
    }

    fn write_draft(&mut self, key: &str, value: DraftValue) -> Result<()> {
        self.borrow_mut().write_draft(key, value)
    }

    fn remove_draft(&mut self, key: &str) -> Result<()> {
        self.borrow_mut().remove_draft(key)
    }
}
