use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::action::{ActionArg, ActionItem};
use crate::event::{Emitter, Subscription};
use crate::thread::ThreadRef;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

/// Retained state of the header node. Drawing is left to the host.
#[derive(Debug)]
pub struct HeadSurface {
    id: SurfaceId,
    title: RefCell<Option<String>>,
    aria_label: RefCell<Option<String>>,
    height: Cell<Option<f32>>,
    line_height: Cell<Option<f32>>,
    context_menu: Emitter<PointerEvent>,
}

impl HeadSurface {
    fn new(id: SurfaceId) -> Self {
        Self {
            id,
            title: RefCell::new(None),
            aria_label: RefCell::new(None),
            height: Cell::new(None),
            line_height: Cell::new(None),
            context_menu: Emitter::new(),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Escaped title text.
    pub fn title(&self) -> Option<String> {
        self.title.borrow().clone()
    }

    pub fn aria_label(&self) -> Option<String> {
        self.aria_label.borrow().clone()
    }

    pub fn height(&self) -> Option<f32> {
        self.height.get()
    }

    pub fn line_height(&self) -> Option<f32> {
        self.line_height.get()
    }

    pub fn set_title(&self, escaped: String, aria_label: String) {
        *self.title.borrow_mut() = Some(escaped);
        *self.aria_label.borrow_mut() = Some(aria_label);
    }

    pub fn set_height(&self, px: f32) {
        self.height.set(Some(px));
        self.line_height.set(Some(px));
    }

    pub fn on_context_menu(&self, listener: impl Fn(&PointerEvent) + 'static) -> Subscription {
        self.context_menu.subscribe(listener)
    }

    /// Called by the host when a context-menu gesture lands on the header.
    pub fn dispatch_context_menu(&self, event: PointerEvent) {
        self.context_menu.emit(&event);
    }
}

/// Parent node that header surfaces are mounted into.
#[derive(Debug, Default)]
pub struct SurfaceContainer {
    children: RefCell<Vec<Rc<HeadSurface>>>,
    next_id: Cell<u64>,
}

impl SurfaceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount_head(&self) -> Rc<HeadSurface> {
        let id = SurfaceId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let surface = Rc::new(HeadSurface::new(id));
        self.children.borrow_mut().push(surface.clone());
        surface
    }

    pub fn remove(&self, id: SurfaceId) -> bool {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|child| child.id() != id);
        children.len() != before
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.children.borrow().iter().any(|child| child.id() == id)
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub icon: bool,
    pub label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderedKind {
    Button,
    Dropdown,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAction {
    pub id: String,
    pub kind: RenderedKind,
    pub icon_class: Option<String>,
    pub text: Option<String>,
    pub tooltip: String,
    pub enabled: bool,
}

/// The header's action row.
#[derive(Debug, Default)]
pub struct ActionBar {
    entries: Vec<(ActionItem, RenderOptions)>,
    context: Option<ThreadRef>,
    disposed: bool,
}

impl ActionBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, items: impl IntoIterator<Item = ActionItem>, options: RenderOptions) {
        if self.disposed {
            return;
        }
        self.entries
            .extend(items.into_iter().map(|item| (item, options)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&ActionItem> {
        self.entries.get(index).map(|(item, _)| item)
    }

    pub fn items(&self) -> impl Iterator<Item = &ActionItem> {
        self.entries.iter().map(|(item, _)| item)
    }

    pub fn set_context(&mut self, thread: ThreadRef) {
        self.context = Some(thread);
    }

    pub fn context(&self) -> Option<&ThreadRef> {
        self.context.as_ref()
    }

    pub fn action_arg(&self) -> ActionArg {
        match &self.context {
            Some(thread) => ActionArg::Thread(thread.clone()),
            None => ActionArg::None,
        }
    }

    pub fn render(&self) -> Vec<RenderedAction> {
        self.entries
            .iter()
            .map(|(item, options)| {
                let kind = match item {
                    ActionItem::Command(_) => RenderedKind::Button,
                    ActionItem::Submenu(_) => RenderedKind::Dropdown,
                    ActionItem::Toggle(_) => RenderedKind::Toggle,
                };
                RenderedAction {
                    id: item.id().to_string(),
                    kind,
                    icon_class: item
                        .icon_class()
                        .filter(|_| options.icon)
                        .map(str::to_string),
                    text: options.label.then(|| item.label().to_string()),
                    tooltip: item.label().to_string(),
                    enabled: item.enabled(),
                }
            })
            .collect()
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.entries.clear();
        self.context = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
