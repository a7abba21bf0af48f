use acerun_core::core::{DEFAULT_WORKSPACE_NAME, default_workspace_id};
use acerun_core::types::{WindowGeometry, WorkspaceDocument, parse_document};
use common::{open, read_json, test_config};
use tempfile::TempDir;

mod common;

const FLAT_LEGACY: &str = r#"[
    { "Id": "0b8f4a52-7d5e-4a3c-9a4e-2f1d6c7b8e90", "DisplayName": "Notepad", "FilePath": "C:\\Windows\\notepad.exe" },
    { "DisplayName": "Calc", "FilePath": "C:\\Windows\\calc.exe", "RunAsAdmin": true }
]"#;

const TREE_LEGACY: &str = r#"{
    "Version": 2,
    "Items": [
        { "$type": "app", "DisplayName": "Terminal", "FilePath": "C:\\wt.exe" },
        { "$type": "folder", "DisplayName": "Dev", "IsExpanded": false, "Children": [
            { "$type": "app", "DisplayName": "Editor", "FilePath": "C:\\code.exe" },
            { "$type": "folder", "DisplayName": "Nested", "Children": [
                { "$type": "app", "DisplayName": "Debugger", "FilePath": "C:\\dbg.exe" }
            ] }
        ] }
    ],
    "WindowState": { "Width": 800, "Height": 600 }
}"#;

#[test]
fn test_flat_legacy_list_becomes_ungrouped_items() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    std::fs::write(config.legacy_data_path(), FLAT_LEGACY).unwrap();

    let core = open(&temp);

    let document = core.document();
    assert_eq!(document.ungrouped_items.len(), 2);
    assert!(document.folders.is_empty());
    assert!(document.ungrouped_items[1].run_as_admin);
    assert_eq!(
        document.ungrouped_items[0].id.to_string(),
        "0b8f4a52-7d5e-4a3c-9a4e-2f1d6c7b8e90"
    );
}

#[test]
fn test_tree_legacy_flattens_nested_folders() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    std::fs::write(config.legacy_data_path(), TREE_LEGACY).unwrap();

    let core = open(&temp);

    let document = core.document();
    assert_eq!(document.ungrouped_items.len(), 1);
    assert_eq!(document.folders.len(), 1);
    let dev = &document.folders[0];
    assert_eq!(dev.display_name, "Dev");
    assert!(!dev.is_expanded);
    let names: Vec<_> = dev.children.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(names, ["Editor", "Debugger"]);

    // Window size moves from the document to the config
    assert_eq!(
        core.workspace_config().window_state,
        Some(WindowGeometry {
            width: 800,
            height: 600
        })
    );
    assert!(document.window_state.is_none());
}

#[test]
fn test_migration_writes_current_formats() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    std::fs::write(config.legacy_data_path(), TREE_LEGACY).unwrap();

    open(&temp);

    let config_json = read_json(&config.config_path());
    assert_eq!(config_json["Version"], 1);
    assert_eq!(config_json["Workspaces"][0]["Name"], DEFAULT_WORKSPACE_NAME);
    assert_eq!(config_json["Workspaces"][0]["AppCount"], 3);
    assert_eq!(
        config_json["ActiveWorkspaceId"],
        default_workspace_id().to_string()
    );

    let workspace_file = config
        .workspaces_path()
        .join(format!("{}.json", default_workspace_id()));
    let workspace_json = read_json(&workspace_file);
    assert_eq!(workspace_json["Version"], WorkspaceDocument::VERSION);
    assert!(workspace_json.get("WindowState").is_none());
    assert!(workspace_json["UngroupedItems"].is_array());

    assert!(!config.legacy_data_path().exists());
    assert!(config.legacy_backup_path().exists());
}

#[test]
fn test_migration_is_not_repeated() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    std::fs::write(config.legacy_data_path(), FLAT_LEGACY).unwrap();
    open(&temp);

    // A stray legacy file after migration is ignored
    std::fs::write(config.legacy_data_path(), FLAT_LEGACY).unwrap();
    let core = open(&temp);

    assert_eq!(core.workspace_config().workspaces.len(), 1);
    assert_eq!(core.document().item_count(), 2);
}

#[test]
fn test_unreadable_legacy_data_starts_empty() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    std::fs::write(config.legacy_data_path(), "not json at all").unwrap();

    let core = open(&temp);

    assert_eq!(core.workspace_config().workspaces.len(), 1);
    assert_eq!(core.document().item_count(), 0);
}

#[test]
fn test_parse_document_accepts_every_generation() {
    let flat = parse_document(FLAT_LEGACY).unwrap();
    let tree = parse_document(TREE_LEGACY).unwrap();
    let current = parse_document(&serde_json::to_string(&tree).unwrap()).unwrap();

    assert_eq!(flat.item_count(), 2);
    assert_eq!(tree.item_count(), 3);
    assert_eq!(current, tree);
    assert_eq!(parse_document("  ").unwrap(), WorkspaceDocument::default());
    assert!(parse_document(r#"{"Something": "else"}"#).is_err());
}
