use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{Emitter, Subscription};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub unique_id: u64,
    pub body: String,
}

impl Comment {
    pub fn new(unique_id: u64, body: impl Into<String>) -> Self {
        Self {
            unique_id,
            body: body.into(),
        }
    }
}

pub type ThreadRef = Rc<CommentThread>;

/// A comment thread owned by the comment system. The header only reads it and
/// listens to `comments` mutations.
#[derive(Debug)]
pub struct CommentThread {
    controller_handle: u64,
    thread_handle: u64,
    label: RefCell<Option<String>>,
    comments: RefCell<Option<Vec<Comment>>>,
    comments_changed: Emitter<Option<Vec<Comment>>>,
}

impl CommentThread {
    pub fn new(controller_handle: u64, thread_handle: u64) -> Self {
        Self {
            controller_handle,
            thread_handle,
            label: RefCell::new(None),
            comments: RefCell::new(None),
            comments_changed: Emitter::new(),
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        *self.label.borrow_mut() = Some(label.into());
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        *self.comments.borrow_mut() = Some(comments);
        self
    }

    pub fn controller_handle(&self) -> u64 {
        self.controller_handle
    }

    pub fn thread_handle(&self) -> u64 {
        self.thread_handle
    }

    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    pub fn set_label(&self, label: Option<String>) {
        *self.label.borrow_mut() = label;
    }

    pub fn comments(&self) -> Option<Vec<Comment>> {
        self.comments.borrow().clone()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.borrow().as_ref().map_or(0, Vec::len)
    }

    pub fn has_comments(&self) -> bool {
        self.comment_count() > 0
    }

    pub fn set_comments(&self, comments: Option<Vec<Comment>>) {
        *self.comments.borrow_mut() = comments.clone();
        self.comments_changed.emit(&comments);
    }

    pub fn push_comment(&self, comment: Comment) {
        let mut comments = self.comments().unwrap_or_default();
        comments.push(comment);
        self.set_comments(Some(comments));
    }

    pub fn on_did_change_comments(
        &self,
        listener: impl Fn(&Option<Vec<Comment>>) + 'static,
    ) -> Subscription {
        self.comments_changed.subscribe(listener)
    }

    pub fn comment_listener_count(&self) -> usize {
        self.comments_changed.listener_count()
    }
}
