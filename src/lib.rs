pub mod app;
pub mod context;
pub mod dock;
pub mod editor;
pub mod init;
pub mod logging;
pub mod render;

pub(crate) mod command_buffer_builder_ext;

// Re-export commonly used items
pub use app::{App, AppConfig};
pub use context::{EngineContext, RenderDebugConfig};
pub use dock::{DockLayout, DockState, MENU_BAR_HEIGHT};
pub use editor::{EditorChanges, EditorUi, Panel, UiLayer};
pub use render::{RenderContext, window_size_dependent_setup};
