pub mod common;
pub mod factory;
pub mod fetch_image;
pub mod file_append;
pub mod file_read;
pub mod file_write;
pub mod infer_assets;
pub mod list_dir;
pub mod registry;
pub mod run_cmd;
pub mod save_page;
pub mod traits;
pub mod types;
pub mod workspace_info;

pub use factory::{default_registry, default_tools};
pub use fetch_image::FetchImageTool;
pub use file_append::FileAppendTool;
pub use file_read::FileReadTool;
pub use file_write::FileWriteTool;
pub use infer_assets::InferAssetsTool;
pub use list_dir::ListDirTool;
pub use registry::ToolRegistry;
pub use run_cmd::RunCmdTool;
pub use save_page::SavePageTool;
pub use traits::{ExecutionContext, Tool};
pub use types::{OutputAttachment, ToolResult, ToolSpec};
pub use workspace_info::WorkspaceInfoTool;
