use super::*;

fn open(state: &mut EditorState, file: &str) -> TabId {
    state
        .open_file(
            &FileId::new(file),
            file,
            LanguageId::from_file_name(file),
            "body",
            None,
        )
        .unwrap()
}

fn active_pane_id(state: &EditorState) -> PaneId {
    state.active_pane_id().clone()
}

#[test]
fn test_new_state_has_one_empty_pane() {
    let state = EditorState::new();
    assert_eq!(state.panes().len(), 1);
    assert!(state.active_pane().is_some());
    assert!(state.tabs().is_empty());
    assert!(state.active_tab().is_none());
}

#[test]
fn test_open_file_is_idempotent() {
    let mut state = EditorState::new();
    let first = open(&mut state, "a.rs");
    let second = open(&mut state, "a.rs");

    assert_eq!(first, second);
    assert_eq!(state.tabs().len(), 1);
    assert_eq!(state.active_pane().unwrap().tab_ids, vec![first.clone()]);
    assert_eq!(state.active_tab().unwrap().id, first);
    assert!(!state.active_tab().unwrap().dirty);
}

#[test]
fn test_open_existing_tab_in_other_pane_shares_it() {
    let mut state = EditorState::new();
    let left = active_pane_id(&state);
    let tab = open(&mut state, "a.rs");
    let right = state.split_pane(SplitDirection::Vertical).unwrap();

    let reused = state
        .open_file(&FileId::new("a.rs"), "a.rs", LanguageId::Rust, "", Some(&right))
        .unwrap();
    assert_eq!(reused, tab);
    assert_eq!(state.tabs().len(), 1);
    assert!(state.pane(&left).unwrap().contains(&tab));
    assert!(state.pane(&right).unwrap().contains(&tab));
    assert_eq!(state.active_pane_id(), &right);
}

#[test]
fn test_open_into_unknown_pane_is_refused() {
    let mut state = EditorState::new();
    let result = state.open_file(
        &FileId::new("a"),
        "a",
        LanguageId::Plaintext,
        "",
        Some(&PaneId::new("nope")),
    );
    assert!(result.is_none());
    assert!(state.tabs().is_empty());
}

#[test]
fn test_update_content_marks_dirty_and_mark_clean_clears() {
    let mut state = EditorState::new();
    let tab = open(&mut state, "a.rs");

    assert!(state.update_tab_content(&tab, "new".to_string()));
    assert!(state.tab(&tab).unwrap().dirty);
    assert_eq!(state.dirty_tab_count(), 1);

    assert!(state.mark_clean(&tab));
    assert_eq!(state.dirty_tab_count(), 0);
    assert!(!state.update_tab_content(&TabId::new("missing"), String::new()));
}

#[test]
fn test_view_state_does_not_dirty() {
    let mut state = EditorState::new();
    let tab = open(&mut state, "a.rs");
    let cursor = CursorPosition {
        line_number: 3,
        column: 7,
    };
    assert!(state.set_tab_view_state(&tab, Some(cursor), None));
    let stored = state.tab(&tab).unwrap();
    assert_eq!(stored.cursor_position, Some(cursor));
    assert!(stored.scroll_position.is_none());
    assert!(!stored.dirty);
}

#[test]
fn test_close_active_tab_picks_predecessor() {
    let mut state = EditorState::new();
    let x = open(&mut state, "x");
    let y = open(&mut state, "y");
    let z = open(&mut state, "z");
    let pane = active_pane_id(&state);
    assert!(state.set_active_tab(&y, &pane));

    assert!(state.close_tab(&y));
    let pane_state = state.pane(&pane).unwrap();
    assert_eq!(pane_state.tab_ids, vec![x.clone(), z]);
    assert_eq!(pane_state.active_tab_id, Some(x));
    assert!(state.tab(&y).is_none());
}

#[test]
fn test_close_first_active_tab_picks_successor() {
    let mut state = EditorState::new();
    let x = open(&mut state, "x");
    let y = open(&mut state, "y");
    let pane = active_pane_id(&state);
    state.set_active_tab(&x, &pane);

    state.close_tab(&x);
    assert_eq!(state.pane(&pane).unwrap().active_tab_id, Some(y));
}

#[test]
fn test_close_inactive_tab_keeps_active() {
    let mut state = EditorState::new();
    let x = open(&mut state, "x");
    let y = open(&mut state, "y");
    let pane = active_pane_id(&state);

    state.close_tab(&x);
    assert_eq!(state.pane(&pane).unwrap().active_tab_id, Some(y));
}

#[test]
fn test_close_last_tab_empties_pane() {
    let mut state = EditorState::new();
    let x = open(&mut state, "x");
    state.close_tab(&x);
    let pane = state.active_pane().unwrap();
    assert!(pane.tab_ids.is_empty());
    assert!(pane.active_tab_id.is_none());
    assert!(!state.close_tab(&x));
}

#[test]
fn test_close_tabs_for_files_prunes_every_pane() {
    let mut state = EditorState::new();
    let a = open(&mut state, "a");
    let b = open(&mut state, "b");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();
    state.open_file(&FileId::new("a"), "a", LanguageId::Plaintext, "", Some(&right));

    let mut files = FxHashSet::default();
    files.insert(FileId::new("a"));
    assert_eq!(state.close_tabs_for_files(&files), 1);

    assert!(state.tab(&a).is_none());
    for pane in state.panes() {
        assert!(!pane.contains(&a));
        assert_ne!(pane.active_tab_id.as_ref(), Some(&a));
    }
    assert!(state.pane(&right).unwrap().active_tab_id.is_none());
    assert!(state.tab(&b).is_some());
}

#[test]
fn test_close_other_tabs_keeps_tabs_shown_elsewhere() {
    let mut state = EditorState::new();
    let left = active_pane_id(&state);
    let a = open(&mut state, "a");
    let b = open(&mut state, "b");
    let c = open(&mut state, "c");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();
    state.open_file(&FileId::new("c"), "c", LanguageId::Plaintext, "", Some(&right));

    assert!(state.close_other_tabs(&a, &left));
    let left_pane = state.pane(&left).unwrap();
    assert_eq!(left_pane.tab_ids, vec![a.clone()]);
    assert_eq!(left_pane.active_tab_id, Some(a));
    assert!(state.tab(&b).is_none());
    assert!(state.tab(&c).is_some());
}

#[test]
fn test_close_other_tabs_requires_membership() {
    let mut state = EditorState::new();
    let left = active_pane_id(&state);
    open(&mut state, "a");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();
    let b = state
        .open_file(&FileId::new("b"), "b", LanguageId::Plaintext, "", Some(&right))
        .unwrap();

    assert!(!state.close_other_tabs(&b, &left));
    assert_eq!(state.tabs().len(), 2);
}

#[test]
fn test_close_all_tabs_in_pane() {
    let mut state = EditorState::new();
    let left = active_pane_id(&state);
    open(&mut state, "a");
    let shared = open(&mut state, "b");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();
    state.open_file(&FileId::new("b"), "b", LanguageId::Plaintext, "", Some(&right));

    assert!(state.close_all_tabs(&left));
    assert!(state.pane(&left).unwrap().tab_ids.is_empty());
    assert_eq!(state.tabs().len(), 1);
    assert_eq!(state.tabs()[0].id, shared);
}

#[test]
fn test_reorder_tabs() {
    let mut state = EditorState::new();
    let pane = active_pane_id(&state);
    let a = open(&mut state, "a");
    let b = open(&mut state, "b");
    let c = open(&mut state, "c");

    assert!(state.reorder_tabs(&pane, 0, 10));
    let pane_state = state.pane(&pane).unwrap();
    assert_eq!(pane_state.tab_ids, vec![b, c.clone(), a]);
    assert_eq!(pane_state.active_tab_id, Some(c));

    assert!(!state.reorder_tabs(&pane, 5, 0));
    assert!(!state.reorder_tabs(&PaneId::new("missing"), 0, 1));
}

#[test]
fn test_split_is_capped_and_close_split_keeps_one() {
    let mut state = EditorState::new();
    let first = active_pane_id(&state);
    let second = state.split_pane(SplitDirection::Vertical).unwrap();
    assert_eq!(state.split().direction, SplitDirection::Vertical);

    for _ in 0..5 {
        assert!(state.split_pane(SplitDirection::Horizontal).is_none());
        assert_eq!(state.panes().len(), MAX_PANES);
    }

    assert!(state.close_split(&first));
    assert_eq!(state.panes().len(), 1);
    assert_eq!(state.active_pane_id(), &second);
    assert!(!state.close_split(&second));
    assert_eq!(state.panes().len(), 1);
}

#[test]
fn test_close_split_drops_tabs_only_it_listed() {
    let mut state = EditorState::new();
    let shared = open(&mut state, "shared");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();
    state.open_file(&FileId::new("shared"), "shared", LanguageId::Plaintext, "", Some(&right));
    let only_right = state
        .open_file(&FileId::new("solo"), "solo", LanguageId::Plaintext, "", Some(&right))
        .unwrap();

    assert!(state.close_split(&right));
    assert!(state.tab(&shared).is_some());
    assert!(state.tab(&only_right).is_none());
}

#[test]
fn test_set_active_tab_requires_membership_and_focuses_pane() {
    let mut state = EditorState::new();
    let left = active_pane_id(&state);
    let a = open(&mut state, "a");
    let right = state.split_pane(SplitDirection::Horizontal).unwrap();

    assert!(!state.set_active_tab(&a, &right));
    assert!(state.set_active_pane(&right));
    assert!(state.set_active_tab(&a, &left));
    assert_eq!(state.active_pane_id(), &left);
    assert!(!state.set_active_pane(&PaneId::new("missing")));
}

#[test]
fn test_rename_file_updates_bound_tab() {
    let mut state = EditorState::new();
    let tab = open(&mut state, "a.js");
    assert!(state.rename_file(&FileId::new("a.js"), "a.py", Some(LanguageId::Python)));
    let tab = state.tab(&tab).unwrap();
    assert_eq!(tab.name, "a.py");
    assert_eq!(tab.language, LanguageId::Python);
}

#[test]
fn test_restore_repairs_layout() {
    let tabs = vec![
        EditorTabState::new(
            TabId::new("t1"),
            FileId::new("f1"),
            "a".into(),
            LanguageId::Plaintext,
            String::new(),
        ),
        EditorTabState::new(
            TabId::new("t2"),
            FileId::new("f2"),
            "b".into(),
            LanguageId::Plaintext,
            String::new(),
        ),
        EditorTabState::new(
            TabId::new("t1"),
            FileId::new("f3"),
            "dup".into(),
            LanguageId::Plaintext,
            String::new(),
        ),
    ];
    let split = SplitConfig {
        direction: SplitDirection::Vertical,
        panes: vec![
            EditorPaneState {
                id: PaneId::new("left"),
                tab_ids: vec![TabId::new("ghost"), TabId::new("t1")],
                active_tab_id: Some(TabId::new("ghost")),
            },
            EditorPaneState::new(PaneId::new("right")),
            EditorPaneState::new(PaneId::new("extra")),
        ],
    };

    let mut state = EditorState::new();
    state.restore(tabs, Some(split));

    assert_eq!(state.tabs().len(), 2);
    assert_eq!(state.panes().len(), 2);
    let left = state.pane(&PaneId::new("left")).unwrap();
    assert_eq!(left.tab_ids, vec![TabId::new("t1"), TabId::new("t2")]);
    assert_eq!(left.active_tab_id, Some(TabId::new("t1")));
    assert_eq!(state.active_pane_id(), &PaneId::new("left"));

    let fresh = state.split_pane(SplitDirection::Horizontal);
    assert!(fresh.is_none());
}

#[test]
fn test_restore_without_layout_uses_single_pane() {
    let tabs = vec![EditorTabState::new(
        TabId::new("t1"),
        FileId::new("f1"),
        "a".into(),
        LanguageId::Plaintext,
        String::new(),
    )];
    let mut state = EditorState::new();
    open(&mut state, "old");
    state.split_pane(SplitDirection::Horizontal);

    state.restore(tabs, None);
    assert_eq!(state.panes().len(), 1);
    assert_eq!(state.active_tab().unwrap().id, TabId::new("t1"));

    let next = open(&mut state, "new");
    assert_ne!(next, TabId::new("t1"));
}

#[test]
fn test_tab_serializes_camel_case() {
    let tab = EditorTabState::new(
        TabId::new("t1"),
        FileId::new("f1"),
        "a.rs".into(),
        LanguageId::Rust,
        "fn main() {}".into(),
    );
    let value = serde_json::to_value(&tab).unwrap();
    assert_eq!(value["fileId"], "f1");
    assert_eq!(value["isDirty"], false);
    assert_eq!(value["language"], "rust");
    assert!(value.get("cursorPosition").is_none());
}
