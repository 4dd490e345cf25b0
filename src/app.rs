use crate::controller::DomController;
use crate::core::Session;
use std::cell::RefCell;
use std::rc::Rc;

/// The session and the DOM controller it reports to, borrowed together by
/// every event handler and the frame loop.
pub struct App {
    pub session: Session,
    pub ui: DomController,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    pub fn new(session: Session, mut ui: DomController) -> Self {
        session.sync(&mut ui);
        Self { session, ui }
    }

    #[inline]
    pub fn with<R>(&mut self, f: impl FnOnce(&mut Session, &mut DomController) -> R) -> R {
        f(&mut self.session, &mut self.ui)
    }
}
