pub mod action;
pub mod affordance;
pub mod config;
pub mod context_menu;
pub mod event;
pub mod header;
pub mod label;
pub mod menu;
pub mod surface;
pub mod sync;
pub mod thread;

pub use action::{Action, ActionArg, ActionItem, ActionRunEvent, ActionRunner, SubmenuAction};
pub use affordance::{Affordance, AffordanceState, TOGGLE_ACTION_ID, ToggleAction, ToggleLabels};
pub use config::{ConfigStore, HeaderConfig};
pub use context_menu::{
    ContextMenuRequest, ContextMenuService, ContextPayload, MarshalledKind,
    show_thread_context_menu,
};
pub use event::{Disposable, DisposableStore, Emitter, OnDispose, Subscription};
pub use header::{HeaderDelegate, HeaderServices, ThreadHeader};
pub use label::{DEFAULT_PLACEHOLDER_LABEL, escape_html, resolve_label};
pub use menu::{
    ActionGroup, CommentMenus, ContextKeyScope, Menu, MenuOptions, StaticCommentMenus, StaticMenu,
    flatten_groups,
};
pub use surface::{
    ActionBar, HeadSurface, PointerEvent, RenderOptions, RenderedAction, RenderedKind,
    SurfaceContainer, SurfaceId,
};
pub use sync::ActionBarSync;
pub use thread::{Comment, CommentThread, ThreadRef};
