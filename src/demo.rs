use std::rc::Rc;

use anyhow::{Context as _, Result};
use tracing::{error, info, warn};

use hunk_thread_header::{
    Action, ActionArg, ActionGroup, ActionItem, Comment, CommentThread, ConfigStore,
    ContextMenuRequest, ContextMenuService, HeaderConfig, HeaderDelegate, HeaderServices,
    PointerEvent, StaticCommentMenus, SurfaceContainer, ThreadHeader,
};

struct LoggingDelegate;

impl HeaderDelegate for LoggingDelegate {
    fn collapse(&self) {
        info!("delegate asked to collapse the thread");
    }
}

/// Picks the first entry as soon as the menu opens.
struct FirstItemContextMenu;

impl ContextMenuService for FirstItemContextMenu {
    fn show_context_menu(&self, request: ContextMenuRequest) {
        info!(
            "context menu at ({}, {}) with {} actions",
            request.anchor.x,
            request.anchor.y,
            request.actions.len()
        );
        if let Err(err) = request.select(0) {
            error!("context action failed: {err:#}");
        }
    }
}

fn load_config() -> HeaderConfig {
    match ConfigStore::new().and_then(|store| store.load_or_default()) {
        Ok(config) => config,
        Err(err) => {
            warn!("falling back to default header config: {err:#}");
            HeaderConfig::default()
        }
    }
}

fn log_action(id: &'static str) -> Action {
    Action::new(id, id, move |arg| {
        match arg {
            ActionArg::Thread(thread) => {
                info!("{id} ran on thread {}", thread.thread_handle())
            }
            ActionArg::Payload(payload) => info!("{id} ran with {}", payload.to_json()?),
            ActionArg::None => info!("{id} ran without context"),
        }
        Ok(())
    })
    .with_icon("codicon codicon-check")
}

pub fn run() -> Result<()> {
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new(
            "inline",
            vec![ActionItem::Command(log_action("comments.resolve"))],
        )],
        vec![ActionGroup::new(
            "context",
            vec![ActionItem::Command(log_action("comments.copyLink"))],
        )],
    ));
    let container = Rc::new(SurfaceContainer::new());
    let thread = Rc::new(CommentThread::new(1, 7));

    let mut header = ThreadHeader::new(
        &container,
        Rc::new(LoggingDelegate),
        menus.clone(),
        thread.clone(),
        HeaderServices::new(Rc::new(FirstItemContextMenu)).with_config(load_config()),
    );
    header.update_height(24.0);
    info!(
        "title {:?}, row {:?}",
        header.surface().title(),
        header.action_bar().render()
    );

    thread.push_comment(Comment::new(1, "Looks off by one."));
    info!("affordance after first comment: {:?}", header.affordance());

    let last = header.action_bar().len().saturating_sub(1);
    header.run_action(0).context("resolve action failed")?;
    header.run_action(last).context("toggle action failed")?;

    let labelled = Rc::new(CommentThread::new(1, 8).with_label("Design review"));
    header.update_thread(labelled);
    info!("title after swap: {:?}", header.surface().title());

    header
        .surface()
        .dispatch_context_menu(PointerEvent { x: 40.0, y: 12.0 });

    header.dispose();
    info!("mounted surfaces after teardown: {}", container.len());
    Ok(())
}
