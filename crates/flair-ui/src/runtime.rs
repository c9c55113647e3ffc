use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Retained per-key state that outlives a single render pass.
#[derive(Default)]
pub struct Composer {
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    touched: HashSet<String>,
    depth: usize,
}

impl Composer {
    fn touch(&mut self, key: &str) {
        if self.depth > 0 && !self.touched.contains(key) {
            self.touched.insert(key.to_owned());
        }
    }
}

/// Marks one render pass. Keys not remembered during the pass are dropped
/// when the outermost guard ends: their nodes were unmounted.
pub struct ComposeGuard {
    _private: (),
}

impl ComposeGuard {
    pub fn begin() -> Self {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            if c.depth == 0 {
                c.touched.clear();
            }
            c.depth += 1;
        });
        ComposeGuard { _private: () }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.depth -= 1;
            if c.depth > 0 {
                return;
            }
            let touched = std::mem::take(&mut c.touched);
            let before = c.keyed_slots.len();
            c.keyed_slots.retain(|k, _| touched.contains(k));
            let dropped = before - c.keyed_slots.len();
            if dropped > 0 {
                log::trace!("compose: dropped {dropped} unmounted slot(s)");
            }
        });
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();
        c.touch(&key);

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Drops the slot for `key` explicitly. Returns whether one existed.
pub fn forget(key: &str) -> bool {
    COMPOSER.with(|c| c.borrow_mut().keyed_slots.remove(key).is_some())
}
