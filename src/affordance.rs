use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::info;

use crate::event::{Disposable as _, Subscription};
use crate::header::HeaderDelegate;
use crate::thread::{Comment, CommentThread};

pub const TOGGLE_ACTION_ID: &str = "review.expand";

const DELETE_ICON_CLASS: &str = "codicon codicon-trash";
const COLLAPSE_ICON_CLASS: &str = "codicon codicon-chevron-up";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Empty,
    HasComments,
}

impl Affordance {
    pub fn for_comments(comments: Option<&[Comment]>) -> Self {
        match comments {
            Some(comments) if !comments.is_empty() => Self::HasComments,
            _ => Self::Empty,
        }
    }

    pub fn for_thread(thread: &CommentThread) -> Self {
        if thread.has_comments() {
            Self::HasComments
        } else {
            Self::Empty
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Empty => DELETE_ICON_CLASS,
            Self::HasComments => COLLAPSE_ICON_CLASS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabels {
    pub collapse: String,
    pub delete: String,
}

/// Trailing collapse/delete action. Clones share the affordance cell, so a
/// transition shows up in every rendered copy.
#[derive(Clone)]
pub struct ToggleAction {
    state: Rc<Cell<Affordance>>,
    labels: Rc<ToggleLabels>,
    delegate: Rc<dyn HeaderDelegate>,
}

impl ToggleAction {
    pub fn id(&self) -> &'static str {
        TOGGLE_ACTION_ID
    }

    pub fn affordance(&self) -> Affordance {
        self.state.get()
    }

    pub fn icon_class(&self) -> &'static str {
        self.state.get().icon_class()
    }

    pub fn label(&self) -> &str {
        match self.state.get() {
            Affordance::Empty => &self.labels.delete,
            Affordance::HasComments => &self.labels.collapse,
        }
    }

    /// Delete and collapse are the same intent; the delegate decides.
    pub fn run(&self) {
        self.delegate.collapse();
    }
}

impl fmt::Debug for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleAction")
            .field("affordance", &self.state.get())
            .field("labels", &self.labels)
            .finish()
    }
}

/// One-way `Empty -> HasComments` state machine. There is deliberately no way
/// back to `Empty`.
#[derive(Debug)]
pub struct AffordanceState {
    state: Rc<Cell<Affordance>>,
    listener: Rc<RefCell<Option<Subscription>>>,
}

impl AffordanceState {
    pub fn new(thread: &CommentThread) -> Self {
        let state = Rc::new(Cell::new(Affordance::for_thread(thread)));
        let listener = Rc::new(RefCell::new(None::<Subscription>));

        if state.get() == Affordance::Empty {
            let subscription = thread.on_did_change_comments({
                let state = state.clone();
                let listener = Rc::downgrade(&listener);
                move |comments| {
                    if Affordance::for_comments(comments.as_deref()) != Affordance::HasComments {
                        return;
                    }
                    state.set(Affordance::HasComments);
                    info!("comment thread received its first comment, toggle now collapses");
                    if let Some(listener) = listener.upgrade() {
                        let retired = listener.borrow_mut().take();
                        if let Some(mut subscription) = retired {
                            subscription.dispose();
                        }
                    }
                }
            });
            *listener.borrow_mut() = Some(subscription);
        }

        Self { state, listener }
    }

    pub fn current(&self) -> Affordance {
        self.state.get()
    }

    pub fn is_listening(&self) -> bool {
        self.listener.borrow().is_some()
    }

    pub fn toggle_action(
        &self,
        labels: ToggleLabels,
        delegate: Rc<dyn HeaderDelegate>,
    ) -> ToggleAction {
        ToggleAction {
            state: self.state.clone(),
            labels: Rc::new(labels),
            delegate,
        }
    }

    /// Drops the pending transition listener, if it has not fired yet.
    pub fn retire(&self) {
        let retired = self.listener.borrow_mut().take();
        if let Some(mut subscription) = retired {
            subscription.dispose();
        }
    }
}
