use std::fs;
use std::rc::Rc;

use hunk_thread_header::{
    CommentThread, ConfigStore, ContextMenuRequest, ContextMenuService, HeaderConfig,
    HeaderDelegate, HeaderServices, StaticCommentMenus, SurfaceContainer, ThreadHeader,
};
use tempfile::TempDir;

struct TempConfig {
    _dir: TempDir,
    store: ConfigStore,
}

impl TempConfig {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp config dir");
        let path = dir.path().join("nested").join("thread_header.toml");
        Self {
            store: ConfigStore::from_path(path),
            _dir: dir,
        }
    }
}

struct NoopDelegate;

impl HeaderDelegate for NoopDelegate {
    fn collapse(&self) {}
}

struct NoContextMenu;

impl ContextMenuService for NoContextMenu {
    fn show_context_menu(&self, _request: ContextMenuRequest) {}
}

#[test]
fn header_config_defaults() {
    let config = HeaderConfig::default();
    assert_eq!(config.placeholder_label, "Start discussion");
    assert_eq!(config.collapse_label, "Collapse");
    assert_eq!(config.delete_label, "Delete");
    assert_eq!(config.head_height, None);
}

#[test]
fn header_config_parses_partial_toml() {
    let config: HeaderConfig =
        toml::from_str("placeholder_label = \"Begin review\"").expect("partial config parses");
    assert_eq!(config.placeholder_label, "Begin review");
    assert_eq!(config.delete_label, "Delete");
}

#[test]
fn missing_config_file_loads_defaults() {
    let fixture = TempConfig::new();
    let config = fixture
        .store
        .load_or_default()
        .expect("missing file should load defaults");
    assert_eq!(config, HeaderConfig::default());
    assert!(!fixture.store.path().exists());
}

#[test]
fn config_store_round_trips() {
    let fixture = TempConfig::new();
    let config = HeaderConfig {
        placeholder_label: "Neue Diskussion".into(),
        collapse_label: "Einklappen".into(),
        delete_label: "Entfernen".into(),
        head_height: Some(26.0),
    };

    fixture.store.save(&config).expect("config should save");
    let loaded = fixture.store.load_or_default().expect("config should load");

    assert_eq!(loaded, config);
}

#[test]
fn invalid_config_reports_path() {
    let fixture = TempConfig::new();
    fixture
        .store
        .save(&HeaderConfig::default())
        .expect("config should save");
    fs::write(fixture.store.path(), "head_height = \"tall\"").expect("overwrite config");

    let err = fixture
        .store
        .load_or_default()
        .expect_err("bad config should fail");
    assert!(format!("{err:#}").contains("failed to parse TOML config file"));
}

#[test]
fn header_applies_configured_labels_and_height() {
    let config = HeaderConfig {
        placeholder_label: "Begin review".into(),
        collapse_label: "Fold".into(),
        delete_label: "Discard".into(),
        head_height: Some(30.0),
    };
    let container = Rc::new(SurfaceContainer::new());
    let header = ThreadHeader::new(
        &container,
        Rc::new(NoopDelegate),
        Rc::new(StaticCommentMenus::default()),
        Rc::new(CommentThread::new(1, 1)),
        HeaderServices::new(Rc::new(NoContextMenu)).with_config(config),
    );

    assert_eq!(header.surface().title().as_deref(), Some("Begin review"));
    assert_eq!(header.surface().height(), Some(30.0));
    assert_eq!(header.action_bar().render()[0].tooltip, "Discard");

    header.update_height(18.0);
    assert_eq!(header.surface().height(), Some(18.0));
    assert_eq!(header.surface().line_height(), Some(18.0));
}
