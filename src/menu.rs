use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::action::ActionItem;
use crate::event::{Emitter, Subscription};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuOptions {
    pub forward_args: bool,
}

#[derive(Debug, Clone)]
pub struct ActionGroup {
    pub id: String,
    pub actions: Vec<ActionItem>,
}

impl ActionGroup {
    pub fn new(id: impl Into<String>, actions: Vec<ActionItem>) -> Self {
        Self {
            id: id.into(),
            actions,
        }
    }
}

/// Observable set of grouped commands resolved by the registry.
pub trait Menu {
    fn action_groups(&self, options: MenuOptions) -> Vec<ActionGroup>;

    fn on_did_change(&self, listener: Box<dyn Fn()>) -> Subscription;

    fn dispose(&self) {}
}

/// Resolves the header's menus for a context-key scope.
pub trait CommentMenus {
    fn thread_title_actions(&self, scope: &ContextKeyScope) -> Rc<dyn Menu>;

    fn thread_title_context_actions(&self, scope: &ContextKeyScope) -> Rc<dyn Menu>;
}

/// Keeps group order and in-group order.
pub fn flatten_groups(groups: Vec<ActionGroup>) -> Vec<ActionItem> {
    groups
        .into_iter()
        .flat_map(|group| group.actions)
        .collect()
}

/// Shared handle to context-key state. Clones see each other's writes; use
/// `snapshot` for a detached copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextKeyScope {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl ContextKeyScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.borrow_mut().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn snapshot(&self) -> Self {
        Self {
            values: Rc::new(RefCell::new(self.values.borrow().clone())),
        }
    }
}

/// Menu backed by a fixed list of groups that the owner can replace.
#[derive(Debug, Default)]
pub struct StaticMenu {
    groups: RefCell<Vec<ActionGroup>>,
    changed: Emitter<()>,
    last_options: Cell<Option<MenuOptions>>,
    dispose_count: Cell<usize>,
}

impl StaticMenu {
    pub fn new(groups: Vec<ActionGroup>) -> Self {
        Self {
            groups: RefCell::new(groups),
            ..Self::default()
        }
    }

    pub fn set_groups(&self, groups: Vec<ActionGroup>) {
        *self.groups.borrow_mut() = groups;
        self.changed.emit(&());
    }

    pub fn notify_changed(&self) {
        self.changed.emit(&());
    }

    pub fn last_options(&self) -> Option<MenuOptions> {
        self.last_options.get()
    }

    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }

    pub fn dispose_count(&self) -> usize {
        self.dispose_count.get()
    }
}

impl Menu for StaticMenu {
    fn action_groups(&self, options: MenuOptions) -> Vec<ActionGroup> {
        self.last_options.set(Some(options));
        self.groups.borrow().clone()
    }

    fn on_did_change(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.changed.subscribe(move |_| listener())
    }

    fn dispose(&self) {
        self.dispose_count.set(self.dispose_count.get() + 1);
    }
}

/// `CommentMenus` over static groups. The context menu is rebuilt on every
/// request so each gesture gets its own menu to dispose.
#[derive(Debug, Default)]
pub struct StaticCommentMenus {
    title: Rc<StaticMenu>,
    context_groups: RefCell<Vec<ActionGroup>>,
    last_scope: RefCell<Option<ContextKeyScope>>,
    context_menus: RefCell<Vec<Rc<StaticMenu>>>,
}

impl StaticCommentMenus {
    pub fn new(title_groups: Vec<ActionGroup>, context_groups: Vec<ActionGroup>) -> Self {
        Self {
            title: Rc::new(StaticMenu::new(title_groups)),
            context_groups: RefCell::new(context_groups),
            ..Self::default()
        }
    }

    pub fn title_menu(&self) -> Rc<StaticMenu> {
        self.title.clone()
    }

    pub fn set_context_groups(&self, groups: Vec<ActionGroup>) {
        *self.context_groups.borrow_mut() = groups;
    }

    pub fn last_scope(&self) -> Option<ContextKeyScope> {
        self.last_scope.borrow().clone()
    }

    pub fn context_menus(&self) -> Vec<Rc<StaticMenu>> {
        self.context_menus.borrow().clone()
    }
}

impl CommentMenus for StaticCommentMenus {
    fn thread_title_actions(&self, scope: &ContextKeyScope) -> Rc<dyn Menu> {
        *self.last_scope.borrow_mut() = Some(scope.snapshot());
        self.title.clone()
    }

    fn thread_title_context_actions(&self, scope: &ContextKeyScope) -> Rc<dyn Menu> {
        *self.last_scope.borrow_mut() = Some(scope.snapshot());
        let menu = Rc::new(StaticMenu::new(self.context_groups.borrow().clone()));
        self.context_menus.borrow_mut().push(menu.clone());
        menu
    }
}
