use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::action::ActionRunner;
use crate::affordance::{Affordance, AffordanceState};
use crate::config::HeaderConfig;
use crate::context_menu::{ContextMenuService, show_thread_context_menu};
use crate::event::{Disposable, DisposableStore, OnDispose};
use crate::label::{escape_html, resolve_label};
use crate::menu::{CommentMenus, ContextKeyScope, Menu};
use crate::surface::{ActionBar, HeadSurface, SurfaceContainer};
use crate::sync::ActionBarSync;
use crate::thread::ThreadRef;

/// Receives the toggle's intent. Whether that means collapse or delete is up
/// to the implementor.
pub trait HeaderDelegate {
    fn collapse(&self);
}

#[derive(Clone)]
pub struct HeaderServices {
    pub context_keys: ContextKeyScope,
    pub context_menu: Rc<dyn ContextMenuService>,
    pub config: HeaderConfig,
}

impl HeaderServices {
    pub fn new(context_menu: Rc<dyn ContextMenuService>) -> Self {
        Self {
            context_keys: ContextKeyScope::new(),
            context_menu,
            config: HeaderConfig::default(),
        }
    }

    pub fn with_context_keys(mut self, context_keys: ContextKeyScope) -> Self {
        self.context_keys = context_keys;
        self
    }

    pub fn with_config(mut self, config: HeaderConfig) -> Self {
        self.config = config;
        self
    }
}

/// Disposes the title menu on teardown. The header is its only owner.
struct MenuDisposal(Option<Rc<dyn Menu>>);

impl Disposable for MenuDisposal {
    fn dispose(&mut self) {
        if let Some(menu) = self.0.take() {
            menu.dispose();
        }
    }
}

pub struct ThreadHeader {
    surface: Rc<HeadSurface>,
    thread: Rc<RefCell<ThreadRef>>,
    context_keys: ContextKeyScope,
    affordance: AffordanceState,
    action_bar: Rc<RefCell<ActionBar>>,
    action_runner: ActionRunner,
    placeholder_label: String,
    disposables: DisposableStore,
}

impl ThreadHeader {
    pub fn new(
        container: &Rc<SurfaceContainer>,
        delegate: Rc<dyn HeaderDelegate>,
        menus: Rc<dyn CommentMenus>,
        thread: ThreadRef,
        services: HeaderServices,
    ) -> Self {
        let HeaderServices {
            context_keys,
            context_menu,
            config,
        } = services;

        let surface = container.mount_head();
        let mut disposables = DisposableStore::new();
        disposables.add(OnDispose::new({
            let container = Rc::downgrade(container);
            let id = surface.id();
            move || {
                if let Some(container) = container.upgrade() {
                    container.remove(id);
                }
            }
        }));

        let affordance = AffordanceState::new(&thread);
        let toggle = affordance.toggle_action(config.toggle_labels(), delegate);

        let action_bar = Rc::new(RefCell::new(ActionBar::new()));
        let sync = ActionBarSync::new(action_bar.clone(), toggle);
        let title_menu = menus.thread_title_actions(&context_keys);
        sync.rebuild(title_menu.as_ref());
        disposables.add(title_menu.on_did_change(Box::new({
            let menu = Rc::downgrade(&title_menu);
            move || {
                if let Some(menu) = menu.upgrade() {
                    sync.rebuild(menu.as_ref());
                }
            }
        })));
        disposables.add(MenuDisposal(Some(title_menu)));

        let thread = Rc::new(RefCell::new(thread));
        disposables.add(surface.on_context_menu({
            let thread = Rc::downgrade(&thread);
            let scope = context_keys.clone();
            move |event| {
                let Some(thread) = thread.upgrade() else {
                    return;
                };
                let current = thread.borrow().clone();
                show_thread_context_menu(
                    menus.as_ref(),
                    &scope,
                    context_menu.as_ref(),
                    &current,
                    *event,
                );
            }
        }));

        action_bar
            .borrow_mut()
            .set_context(thread.borrow().clone());

        let header = Self {
            surface,
            thread,
            context_keys,
            affordance,
            action_bar,
            action_runner: ActionRunner::new(),
            placeholder_label: config.placeholder_label,
            disposables,
        };
        header.refresh_label();
        if let Some(height) = config.head_height {
            header.update_height(height);
        }

        info!(
            "mounted header for comment thread {} ({:?})",
            header.thread().thread_handle(),
            header.affordance()
        );
        header
    }

    pub fn thread(&self) -> ThreadRef {
        self.thread.borrow().clone()
    }

    pub fn surface(&self) -> &Rc<HeadSurface> {
        &self.surface
    }

    /// Live context keys. Writes are seen by the next context-menu gesture.
    pub fn context_keys(&self) -> &ContextKeyScope {
        &self.context_keys
    }

    pub fn action_bar(&self) -> Ref<'_, ActionBar> {
        self.action_bar.borrow()
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance.current()
    }

    pub fn is_listening_for_first_comment(&self) -> bool {
        self.affordance.is_listening()
    }

    pub fn action_runner(&self) -> &ActionRunner {
        &self.action_runner
    }

    pub fn is_disposed(&self) -> bool {
        self.disposables.is_disposed()
    }

    /// Rebinds the header to another thread. The first-comment listener stays
    /// with whatever thread it was armed on.
    pub fn update_thread(&mut self, thread: ThreadRef) {
        if self.is_disposed() {
            debug!("ignoring thread swap on a disposed header");
            return;
        }

        debug!(
            "swapping header thread {} -> {}",
            self.thread().thread_handle(),
            thread.thread_handle()
        );
        *self.thread.borrow_mut() = thread.clone();
        self.action_bar.borrow_mut().set_context(thread);
        self.refresh_label();
    }

    pub fn update_height(&self, px: f32) {
        self.surface.set_height(px);
    }

    /// Runs the row entry at `index` with the current thread as its argument.
    pub fn run_action(&self, index: usize) -> Result<()> {
        let (item, arg) = {
            let bar = self.action_bar.borrow();
            let item = bar
                .item(index)
                .cloned()
                .ok_or_else(|| anyhow!("no header action at index {index}"))?;
            (item, bar.action_arg())
        };
        self.action_runner.run(&item, &arg)
    }

    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }

        self.action_bar.borrow_mut().dispose();
        self.affordance.retire();
        self.disposables.dispose();
        debug!(
            "disposed header for comment thread {}",
            self.thread().thread_handle()
        );
    }

    fn refresh_label(&self) {
        let thread = self.thread();
        if let Some(label) = resolve_label(&thread, &self.placeholder_label) {
            self.surface.set_title(escape_html(&label), label);
        }
    }
}

impl Drop for ThreadHeader {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for ThreadHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadHeader")
            .field("surface", &self.surface.id())
            .field("thread", &self.thread().thread_handle())
            .field("affordance", &self.affordance())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
