use std::fmt;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use tracing::{debug, error};

use crate::affordance::ToggleAction;
use crate::context_menu::ContextPayload;
use crate::event::{Emitter, Subscription};
use crate::thread::ThreadRef;

/// Argument handed to an action when it runs.
#[derive(Debug, Clone)]
pub enum ActionArg {
    None,
    Thread(ThreadRef),
    Payload(ContextPayload),
}

type RunFn = Rc<dyn Fn(&ActionArg) -> Result<()>>;

/// A command supplied by the menu registry. Rendered as-is.
#[derive(Clone)]
pub struct Action {
    id: String,
    label: String,
    icon_class: Option<String>,
    enabled: bool,
    run: RunFn,
}

impl Action {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        run: impl Fn(&ActionArg) -> Result<()> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon_class: None,
            enabled: true,
            run: Rc::new(run),
        }
    }

    pub fn with_icon(mut self, icon_class: impl Into<String>) -> Self {
        self.icon_class = Some(icon_class.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon_class(&self) -> Option<&str> {
        self.icon_class.as_deref()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn run(&self, arg: &ActionArg) -> Result<()> {
        (self.run)(arg)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon_class", &self.icon_class)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SubmenuAction {
    pub id: String,
    pub label: String,
    pub icon_class: Option<String>,
    pub actions: Vec<Action>,
}

/// Everything that can sit in the header's action row.
#[derive(Debug, Clone)]
pub enum ActionItem {
    Command(Action),
    Submenu(SubmenuAction),
    Toggle(ToggleAction),
}

impl ActionItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Command(action) => action.id(),
            Self::Submenu(submenu) => &submenu.id,
            Self::Toggle(toggle) => toggle.id(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Command(action) => action.label(),
            Self::Submenu(submenu) => &submenu.label,
            Self::Toggle(toggle) => toggle.label(),
        }
    }

    pub fn icon_class(&self) -> Option<&str> {
        match self {
            Self::Command(action) => action.icon_class(),
            Self::Submenu(submenu) => submenu.icon_class.as_deref(),
            Self::Toggle(toggle) => Some(toggle.icon_class()),
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Self::Command(action) => action.enabled(),
            Self::Submenu(submenu) => submenu.actions.iter().any(Action::enabled),
            Self::Toggle(_) => true,
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(self, Self::Toggle(_))
    }

    fn run(&self, arg: &ActionArg) -> Result<()> {
        match self {
            Self::Command(action) => action.run(arg),
            Self::Submenu(submenu) => Err(submenu_run_error(submenu)),
            Self::Toggle(toggle) => {
                toggle.run();
                Ok(())
            }
        }
    }
}

fn submenu_run_error(submenu: &SubmenuAction) -> anyhow::Error {
    anyhow!("submenu {} only opens its children and cannot run", submenu.id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRunEvent {
    pub action_id: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ActionRunner {
    did_run: Emitter<ActionRunEvent>,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_did_run(&self, listener: impl Fn(&ActionRunEvent) + 'static) -> Subscription {
        self.did_run.subscribe(listener)
    }

    /// Runs `item` with `arg`. Disabled items are skipped; action errors are
    /// returned to the caller untouched. Submenus are rejected without a
    /// `did_run` event.
    pub fn run(&self, item: &ActionItem, arg: &ActionArg) -> Result<()> {
        if let ActionItem::Submenu(submenu) = item {
            return Err(submenu_run_error(submenu));
        }
        if !item.enabled() {
            debug!("skipping disabled action {}", item.id());
            return Ok(());
        }

        let result = item.run(arg);
        if let Err(err) = &result {
            error!("action {} failed: {err:#}", item.id());
        }
        self.did_run.emit(&ActionRunEvent {
            action_id: item.id().to_string(),
            error: result.as_ref().err().map(|err| format!("{err:#}")),
        });
        result
    }
}
