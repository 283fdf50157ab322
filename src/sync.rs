use std::cell::RefCell;
use std::iter;
use std::rc::Rc;

use tracing::debug;

use crate::action::ActionItem;
use crate::affordance::ToggleAction;
use crate::menu::{Menu, MenuOptions, flatten_groups};
use crate::surface::{ActionBar, RenderOptions};

const ROW_RENDER_OPTIONS: RenderOptions = RenderOptions {
    icon: true,
    label: false,
};

/// Keeps the action row equal to the title menu's commands plus the toggle.
#[derive(Debug, Clone)]
pub struct ActionBarSync {
    bar: Rc<RefCell<ActionBar>>,
    toggle: ToggleAction,
}

impl ActionBarSync {
    pub fn new(bar: Rc<RefCell<ActionBar>>, toggle: ToggleAction) -> Self {
        Self { bar, toggle }
    }

    pub fn toggle(&self) -> &ToggleAction {
        &self.toggle
    }

    pub fn rebuild(&self, menu: &dyn Menu) {
        let actions = flatten_groups(menu.action_groups(MenuOptions { forward_args: true }));
        let count = actions.len() + 1;

        let mut bar = self.bar.borrow_mut();
        bar.clear();
        bar.push(
            actions
                .into_iter()
                .chain(iter::once(ActionItem::Toggle(self.toggle.clone()))),
            ROW_RENDER_OPTIONS,
        );
        debug!("rebuilt comment thread action row with {count} entries");
    }
}
