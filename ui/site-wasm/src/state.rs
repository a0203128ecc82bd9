//! Shared application context.
//!
//! Explicit stores passed to components at construction instead of
//! module-level globals; everything is reference-counted and lives for
//! the page lifetime.

use std::rc::Rc;

use crate::modal::ModalController;
use crate::store::BrowserStore;
use crate::theme::ThemeController;

pub struct SiteCtx {
    pub store: Rc<BrowserStore>,
    pub theme: ThemeController,
    pub modal: Rc<ModalController>,
}

impl SiteCtx {
    pub fn new() -> Rc<Self> {
        let store = Rc::new(BrowserStore);
        Rc::new(Self {
            theme: ThemeController::new(store.clone()),
            modal: ModalController::new(),
            store,
        })
    }
}
