use std::fmt;

use anyhow::{Context as _, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{ActionArg, ActionItem, ActionRunner};
use crate::menu::{CommentMenus, ContextKeyScope, MenuOptions, flatten_groups};
use crate::surface::PointerEvent;
use crate::thread::CommentThread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarshalledKind {
    CommentThread,
}

/// Thread identity handed to context actions. Safe to send across a process
/// boundary because it never holds the live thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPayload {
    pub comment_control_handle: u64,
    pub comment_thread_handle: u64,
    pub kind_tag: MarshalledKind,
}

impl ContextPayload {
    pub fn for_thread(thread: &CommentThread) -> Self {
        Self {
            comment_control_handle: thread.controller_handle(),
            comment_thread_handle: thread.thread_handle(),
            kind_tag: MarshalledKind::CommentThread,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize comment thread context payload")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse comment thread context payload")
    }
}

pub struct ContextMenuRequest {
    pub anchor: PointerEvent,
    pub actions: Vec<ActionItem>,
    pub action_runner: ActionRunner,
    pub actions_context: Box<dyn Fn() -> ContextPayload>,
}

impl ContextMenuRequest {
    /// Runs the action the user picked with a fresh identity payload.
    pub fn select(&self, index: usize) -> Result<()> {
        let item = self
            .actions
            .get(index)
            .ok_or_else(|| anyhow!("no context action at index {index}"))?;
        let payload = (self.actions_context)();
        self.action_runner.run(item, &ActionArg::Payload(payload))
    }
}

impl fmt::Debug for ContextMenuRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuRequest")
            .field("anchor", &self.anchor)
            .field("actions", &self.actions)
            .finish()
    }
}

/// Presents context menus. The widget itself belongs to the host.
pub trait ContextMenuService {
    fn show_context_menu(&self, request: ContextMenuRequest);
}

/// Returns whether a menu was shown.
pub fn show_thread_context_menu(
    menus: &dyn CommentMenus,
    scope: &ContextKeyScope,
    service: &dyn ContextMenuService,
    thread: &CommentThread,
    anchor: PointerEvent,
) -> bool {
    let menu = menus.thread_title_context_actions(scope);
    let actions = flatten_groups(menu.action_groups(MenuOptions { forward_args: true }));
    menu.dispose();

    if actions.is_empty() {
        debug!(
            "no context actions for comment thread {}",
            thread.thread_handle()
        );
        return false;
    }

    let payload = ContextPayload::for_thread(thread);
    service.show_context_menu(ContextMenuRequest {
        anchor,
        actions,
        action_runner: ActionRunner::new(),
        actions_context: Box::new(move || payload),
    });
    true
}
