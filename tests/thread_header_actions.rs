use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use hunk_thread_header::{
    Action, ActionArg, ActionBar, ActionBarSync, ActionGroup, ActionItem, AffordanceState,
    CommentThread, ContextKeyScope, ContextMenuRequest, ContextMenuService, HeaderDelegate,
    HeaderServices, MenuOptions, RenderedKind, StaticCommentMenus, StaticMenu, SubmenuAction,
    SurfaceContainer, TOGGLE_ACTION_ID, ThreadHeader, ToggleLabels,
};

struct NoopDelegate;

impl HeaderDelegate for NoopDelegate {
    fn collapse(&self) {}
}

struct NoContextMenu;

impl ContextMenuService for NoContextMenu {
    fn show_context_menu(&self, _request: ContextMenuRequest) {}
}

fn command(id: &str) -> ActionItem {
    ActionItem::Command(Action::new(id, id, |_| Ok(())).with_icon(format!("icon-{id}")))
}

fn recording_command(id: &str, seen: Rc<RefCell<Vec<String>>>) -> ActionItem {
    let label = id.to_string();
    ActionItem::Command(Action::new(id, id, move |arg| {
        let entry = match arg {
            ActionArg::Thread(thread) => format!("{label}@{}", thread.thread_handle()),
            ActionArg::Payload(_) => format!("{label}@payload"),
            ActionArg::None => format!("{label}@none"),
        };
        seen.borrow_mut().push(entry);
        Ok(())
    }))
}

fn ids(header: &ThreadHeader) -> Vec<String> {
    header
        .action_bar()
        .render()
        .into_iter()
        .map(|action| action.id)
        .collect()
}

fn mount(
    menus: Rc<StaticCommentMenus>,
    thread: Rc<CommentThread>,
) -> (Rc<SurfaceContainer>, ThreadHeader) {
    let container = Rc::new(SurfaceContainer::new());
    let header = ThreadHeader::new(
        &container,
        Rc::new(NoopDelegate),
        menus,
        thread,
        HeaderServices::new(Rc::new(NoContextMenu)),
    );
    (container, header)
}

#[test]
fn rebuild_is_idempotent_for_unchanged_menu() {
    let thread = CommentThread::new(1, 1);
    let affordance = AffordanceState::new(&thread);
    let toggle = affordance.toggle_action(
        ToggleLabels {
            collapse: "Collapse".into(),
            delete: "Delete".into(),
        },
        Rc::new(NoopDelegate),
    );
    let bar = Rc::new(RefCell::new(ActionBar::new()));
    let sync = ActionBarSync::new(bar.clone(), toggle);
    let menu = StaticMenu::new(vec![
        ActionGroup::new("a", vec![command("one"), command("two")]),
        ActionGroup::new("b", vec![command("three")]),
    ]);

    sync.rebuild(&menu);
    sync.rebuild(&menu);

    assert_eq!(bar.borrow().len(), 4);
    assert_eq!(
        menu.last_options(),
        Some(MenuOptions { forward_args: true })
    );
}

#[test]
fn row_flattens_groups_in_order_and_ends_with_toggle() {
    let menus = Rc::new(StaticCommentMenus::new(
        vec![
            ActionGroup::new("inline", vec![command("a"), command("b")]),
            ActionGroup::new("more", vec![command("c")]),
        ],
        Vec::new(),
    ));
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));

    assert_eq!(ids(&header), vec!["a", "b", "c", TOGGLE_ACTION_ID]);
    for action in header.action_bar().render() {
        assert!(action.text.is_none());
        assert!(action.icon_class.is_some());
    }
}

#[test]
fn menu_change_rebuilds_row() {
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![command("a")])],
        Vec::new(),
    ));
    let title = menus.title_menu();
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));

    title.notify_changed();
    title.notify_changed();
    assert_eq!(ids(&header), vec!["a", TOGGLE_ACTION_ID]);

    title.set_groups(vec![
        ActionGroup::new("inline", vec![command("x")]),
        ActionGroup::new("extra", vec![command("y"), command("z")]),
    ]);
    assert_eq!(ids(&header), vec!["x", "y", "z", TOGGLE_ACTION_ID]);

    title.set_groups(Vec::new());
    assert_eq!(ids(&header), vec![TOGGLE_ACTION_ID]);
}

#[test]
fn submenus_render_as_dropdowns() {
    let submenu = ActionItem::Submenu(SubmenuAction {
        id: "more".into(),
        label: "More".into(),
        icon_class: Some("codicon codicon-ellipsis".into()),
        actions: vec![Action::new("inner", "Inner", |_| Ok(()))],
    });
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![submenu])],
        Vec::new(),
    ));
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));

    let row = header.action_bar().render();
    assert_eq!(row[0].kind, RenderedKind::Dropdown);
    assert_eq!(row[0].tooltip, "More");
    assert_eq!(row[1].kind, RenderedKind::Toggle);
}

#[test]
fn running_a_submenu_entry_fails_without_a_run_event() {
    let inner_runs = Rc::new(RefCell::new(Vec::new()));
    let submenu = ActionItem::Submenu(SubmenuAction {
        id: "more".into(),
        label: "More".into(),
        icon_class: None,
        actions: vec![Action::new("inner", "Inner", {
            let inner_runs = inner_runs.clone();
            move |_| {
                inner_runs.borrow_mut().push("inner");
                Ok(())
            }
        })],
    });
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![submenu])],
        Vec::new(),
    ));
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));
    let events = Rc::new(RefCell::new(Vec::new()));
    let _subscription = header.action_runner().on_did_run({
        let events = events.clone();
        move |event| events.borrow_mut().push(event.clone())
    });

    let err = header
        .run_action(0)
        .expect_err("submenu entry should not run");

    assert!(format!("{err:#}").contains("submenu more"));
    assert!(events.borrow().is_empty());
    assert!(inner_runs.borrow().is_empty());
}

#[test]
fn row_actions_receive_current_thread() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new(
            "inline",
            vec![recording_command("resolve", seen.clone())],
        )],
        Vec::new(),
    ));
    let (_container, mut header) = mount(menus, Rc::new(CommentThread::new(1, 11)));

    header.run_action(0).expect("action runs");
    header.update_thread(Rc::new(CommentThread::new(1, 12)));
    header.run_action(0).expect("action runs after swap");

    assert_eq!(*seen.borrow(), vec!["resolve@11", "resolve@12"]);
}

#[test]
fn disabled_actions_render_but_do_not_run() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let disabled = match recording_command("archive", seen.clone()) {
        ActionItem::Command(action) => ActionItem::Command(action.with_enabled(false)),
        other => other,
    };
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![disabled])],
        Vec::new(),
    ));
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));

    assert!(!header.action_bar().render()[0].enabled);
    header.run_action(0).expect("disabled action is skipped");
    assert!(seen.borrow().is_empty());
}

#[test]
fn action_errors_propagate_and_are_reported() {
    let failing = ActionItem::Command(Action::new("boom", "Boom", |_| {
        Err(anyhow!("registry down"))
    }));
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![failing])],
        Vec::new(),
    ));
    let (_container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));
    let events = Rc::new(RefCell::new(Vec::new()));
    let _subscription = header.action_runner().on_did_run({
        let events = events.clone();
        move |event| events.borrow_mut().push(event.clone())
    });

    let err = header.run_action(0).expect_err("action error should surface");
    assert!(format!("{err:#}").contains("registry down"));
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0].action_id, "boom");
    assert!(events.borrow()[0].error.is_some());

    assert!(header.run_action(99).is_err());
}

#[test]
fn teardown_releases_menu_once_and_unmounts_surface() {
    let menus = Rc::new(StaticCommentMenus::new(
        vec![ActionGroup::new("inline", vec![command("a")])],
        Vec::new(),
    ));
    let title = menus.title_menu();
    let (container, mut header) = mount(menus.clone(), Rc::new(CommentThread::new(1, 1)));
    assert_eq!(container.len(), 1);
    assert_eq!(title.listener_count(), 1);
    assert_eq!(menus.last_scope(), Some(ContextKeyScope::new()));

    header.dispose();
    header.dispose();
    drop(header);

    assert!(container.is_empty());
    assert_eq!(title.listener_count(), 0);
    assert_eq!(title.dispose_count(), 1);

    title.notify_changed();
}

#[test]
fn dropping_header_tears_it_down() {
    let menus = Rc::new(StaticCommentMenus::default());
    let title = menus.title_menu();
    let (container, header) = mount(menus, Rc::new(CommentThread::new(1, 1)));

    drop(header);

    assert!(container.is_empty());
    assert_eq!(title.dispose_count(), 1);
}
