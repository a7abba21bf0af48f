use super::*;

fn sample_document() -> (WorkspaceDocument, ItemId, ItemId, ItemId) {
    let mut document = WorkspaceDocument::default();
    let loose = LaunchItem::new("Terminal", "C:\\Windows\\System32\\cmd.exe");
    let mut folder = Folder::new("Dev");
    let editor = LaunchItem::new("Editor", "C:\\Tools\\editor.exe");
    let editor_id = editor.id;
    folder.children.push(editor);
    let loose_id = loose.id;
    let folder_id = folder.id;
    document.ungrouped_items.push(loose);
    document.folders.push(folder);
    (document, loose_id, folder_id, editor_id)
}

mod round_trip {
    use super::*;

    #[test]
    fn test_save_then_load_preserves_all_fields() {
        let (mut document, loose_id, _, editor_id) = sample_document();
        document.record_launch(editor_id).unwrap();
        document.record_launch(loose_id).unwrap();
        let item = document.find_item_mut(loose_id).unwrap();
        item.arguments = "/k echo hi".to_string();
        item.working_directory = "C:\\".to_string();
        item.run_as_admin = true;
        item.custom_icon_path = "C:\\icons\\term.png".to_string();

        let json = serde_json::to_string_pretty(&document).unwrap();
        let loaded = versioned_document::parse(&json).unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_empty_document_round_trips() {
        let document = WorkspaceDocument::default();
        let json = serde_json::to_string(&document).unwrap();
        assert_eq!(versioned_document::parse(&json).unwrap(), document);
    }

    #[test]
    fn test_absent_window_state_is_not_written() {
        let json = serde_json::to_string(&WorkspaceDocument::default()).unwrap();
        assert!(!json.contains("WindowState"));
    }
}

mod queries {
    use super::*;

    #[test]
    fn test_item_count_includes_folder_children() {
        let (document, ..) = sample_document();
        assert_eq!(document.item_count(), 2);
    }

    #[test]
    fn test_item_ids_cover_every_container() {
        let (document, loose_id, folder_id, editor_id) = sample_document();
        let ids = document.item_ids();
        assert!(ids.contains(&loose_id));
        assert!(ids.contains(&editor_id));
        assert!(!ids.contains(&folder_id));
    }

    #[test]
    fn test_folder_of() {
        let (document, loose_id, folder_id, editor_id) = sample_document();
        assert_eq!(document.folder_of(editor_id), Some(folder_id));
        assert_eq!(document.folder_of(loose_id), None);
    }
}

mod add_item {
    use super::*;

    #[test]
    fn test_add_to_folder() {
        let (mut document, _, folder_id, _) = sample_document();
        let item = LaunchItem::new("Debugger", "C:\\dbg.exe");
        let id = item.id;

        document.add_item(item, Some(folder_id)).unwrap();

        assert_eq!(document.folder_of(id), Some(folder_id));
        assert_eq!(document.item_count(), 3);
    }

    #[test]
    fn test_add_to_unknown_folder_fails() {
        let (mut document, ..) = sample_document();
        let missing = ItemId::new();

        let result = document.add_item(LaunchItem::new("x", "x.exe"), Some(missing));

        assert!(matches!(result, Err(DocumentError::FolderNotFound(id)) if id == missing));
        assert_eq!(document.item_count(), 2);
    }

    #[test]
    fn test_add_existing_id_to_another_container_fails() {
        let (mut document, loose_id, folder_id, _) = sample_document();
        let copy = document.find_item(loose_id).cloned().unwrap();

        let result = document.add_item(copy, Some(folder_id));

        assert!(matches!(result, Err(DocumentError::DuplicateItem(id)) if id == loose_id));
        assert_eq!(document.item_count(), 2);

        document.remove_item(loose_id).unwrap();
        assert!(document.find_item(loose_id).is_none());
        assert_eq!(document.item_count(), 1);
    }

    #[test]
    fn test_add_item_with_folder_id_fails() {
        let (mut document, _, folder_id, _) = sample_document();
        let mut item = LaunchItem::new("x", "x.exe");
        item.id = folder_id;

        let result = document.add_item(item, None);

        assert!(matches!(result, Err(DocumentError::DuplicateItem(_))));
        assert!(document.ungrouped_items.iter().all(|i| i.id != folder_id));
    }
}

mod add_folder {
    use super::*;

    #[test]
    fn test_add_folder_with_reused_child_id_fails() {
        let (mut document, _, _, editor_id) = sample_document();
        let mut folder = Folder::new("Copy");
        folder
            .children
            .push(document.find_item(editor_id).cloned().unwrap());

        let result = document.add_folder(folder);

        assert!(matches!(result, Err(DocumentError::DuplicateItem(id)) if id == editor_id));
        assert_eq!(document.folders.len(), 1);
    }

    #[test]
    fn test_add_same_folder_twice_fails() {
        let (mut document, ..) = sample_document();
        let folder = Folder::new("Games");

        document.add_folder(folder.clone()).unwrap();
        let result = document.add_folder(folder);

        assert!(matches!(result, Err(DocumentError::DuplicateItem(_))));
        assert_eq!(document.folders.len(), 2);
    }
}

mod replace_item {
    use super::*;

    #[test]
    fn test_replace_returns_previous_and_keeps_position() {
        let (mut document, _, folder_id, editor_id) = sample_document();
        let mut edited = document.find_item(editor_id).unwrap().clone();
        edited.file_path = "D:\\new\\editor.exe".to_string();

        let previous = document.replace_item(edited.clone()).unwrap();

        assert_eq!(previous.file_path, "C:\\Tools\\editor.exe");
        assert!(previous.icon_source_differs(&edited));
        assert_eq!(document.folder_of(editor_id), Some(folder_id));
        assert_eq!(document.find_item(editor_id), Some(&edited));
    }

    #[test]
    fn test_replace_unknown_item_fails() {
        let (mut document, ..) = sample_document();
        let result = document.replace_item(LaunchItem::new("ghost", "ghost.exe"));
        assert!(matches!(result, Err(DocumentError::ItemNotFound(_))));
    }
}

mod remove {
    use super::*;

    #[test]
    fn test_remove_item_purges_recent_launch() {
        let (mut document, loose_id, _, editor_id) = sample_document();
        document.record_launch(loose_id).unwrap();
        document.record_launch(editor_id).unwrap();

        document.remove_item(loose_id).unwrap();

        assert!(document.find_item(loose_id).is_none());
        let recents: Vec<_> = document.recent_launches.iter().map(|r| r.item_id).collect();
        assert_eq!(recents, vec![editor_id]);
    }

    #[test]
    fn test_remove_folder_cascades_to_children() {
        let (mut document, loose_id, folder_id, editor_id) = sample_document();
        document.record_launch(editor_id).unwrap();

        let folder = document.remove_folder(folder_id).unwrap();

        assert_eq!(folder.children.len(), 1);
        assert!(document.find_item(editor_id).is_none());
        assert!(document.recent_launches.is_empty());
        assert_eq!(document.item_ids().into_iter().collect::<Vec<_>>(), vec![loose_id]);
    }

    #[test]
    fn test_remove_missing_folder_fails() {
        let (mut document, ..) = sample_document();
        assert!(matches!(
            document.remove_folder(ItemId::new()),
            Err(DocumentError::FolderNotFound(_))
        ));
    }
}

mod move_item {
    use super::*;

    #[test]
    fn test_move_into_folder_at_index() {
        let (mut document, loose_id, folder_id, editor_id) = sample_document();

        document.move_item(loose_id, Some(folder_id), Some(0)).unwrap();

        assert!(document.ungrouped_items.is_empty());
        let children: Vec<_> = document.folders[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children, vec![loose_id, editor_id]);
    }

    #[test]
    fn test_move_out_of_folder_appends() {
        let (mut document, loose_id, _, editor_id) = sample_document();

        document.move_item(editor_id, None, Some(99)).unwrap();

        let ungrouped: Vec<_> = document.ungrouped_items.iter().map(|c| c.id).collect();
        assert_eq!(ungrouped, vec![loose_id, editor_id]);
        assert!(document.folders[0].children.is_empty());
    }

    #[test]
    fn test_move_to_unknown_folder_leaves_item_in_place() {
        let (mut document, loose_id, ..) = sample_document();

        let result = document.move_item(loose_id, Some(ItemId::new()), None);

        assert!(matches!(result, Err(DocumentError::FolderNotFound(_))));
        assert_eq!(document.ungrouped_items[0].id, loose_id);
    }

    #[test]
    fn test_item_belongs_to_one_container_after_move() {
        let (mut document, loose_id, folder_id, _) = sample_document();

        document.move_item(loose_id, Some(folder_id), None).unwrap();

        let occurrences = document.items().filter(|i| i.id == loose_id).count();
        assert_eq!(occurrences, 1);
    }
}

mod folders {
    use super::*;

    #[test]
    fn test_rename_and_collapse_folder() {
        let (mut document, _, folder_id, _) = sample_document();

        document.rename_folder(folder_id, "Development").unwrap();
        document.set_folder_expanded(folder_id, false).unwrap();

        let folder = document.find_folder(folder_id).unwrap();
        assert_eq!(folder.display_name, "Development");
        assert!(!folder.is_expanded);
    }
}

mod fresh_ids {
    use super::*;

    #[test]
    fn test_copy_gets_new_identities_and_remapped_recents() {
        let (mut document, loose_id, folder_id, editor_id) = sample_document();
        document.record_launch(editor_id).unwrap();

        let copy = document.with_fresh_ids();

        assert_eq!(copy.item_count(), document.item_count());
        assert!(copy.item_ids().is_disjoint(&document.item_ids()));
        assert_ne!(copy.folders[0].id, folder_id);
        assert!(copy.find_item(loose_id).is_none());
        let recent = &copy.recent_launches.as_slice()[0];
        assert_eq!(recent.item_id, copy.folders[0].children[0].id);
        assert_eq!(recent.display_name, "Editor");
    }
}
