use super::{
    FetchImageTool, FileAppendTool, FileReadTool, FileWriteTool, InferAssetsTool, ListDirTool,
    RunCmdTool, SavePageTool, Tool, ToolRegistry, WorkspaceInfoTool,
};
use crate::stock::StockClient;
use std::sync::Arc;

/// Create the default tool set.
pub fn default_tools(stock: Arc<StockClient>) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(WorkspaceInfoTool::new()),
        Box::new(ListDirTool::new()),
        Box::new(FileReadTool::new()),
        Box::new(FileWriteTool::new()),
        Box::new(FileAppendTool::new()),
        Box::new(SavePageTool::new()),
        Box::new(RunCmdTool::new()),
        Box::new(FetchImageTool::new(stock)),
        Box::new(InferAssetsTool::new()),
    ]
}

/// Build a registry populated with the default tool set.
pub fn default_registry(stock: Arc<StockClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in default_tools(stock) {
        registry.register(tool);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_exposes_every_tool() {
        let registry = default_registry(Arc::new(StockClient::new(None)));
        let names = registry.tool_names();
        for expected in [
            "append_file",
            "fetch_image",
            "get_workspace",
            "infer_assets",
            "list_dir",
            "read_file",
            "run_cmd",
            "save_page",
            "write_file",
        ] {
            assert!(names.contains(&expected), "missing tool {expected}");
        }
        assert_eq!(names.len(), 9);
    }
}
