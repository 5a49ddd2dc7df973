use shopping_list::storage::{ItemStore, MemoryStore};
use shopping_list::{ListError, ListManager, ScriptedDialogs, SubmitMode, UiEvent};

type Manager = ListManager<MemoryStore, ScriptedDialogs>;

fn manager_on(backend: &MemoryStore) -> Manager {
    let mut manager = ListManager::new(ItemStore::new(backend.clone()), ScriptedDialogs::default());
    manager.dispatch(UiEvent::Load).unwrap();
    manager
}

fn submit(manager: &mut Manager, text: &str) -> Result<(), ListError> {
    manager.dispatch(UiEvent::InputChanged(text.to_string()))?;
    manager.dispatch(UiEvent::Submit)
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_reload_reproduces_order() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    for item in ["Milk", "Eggs", "Bread", "apples"] {
        submit(&mut manager, item).unwrap();
    }

    let reloaded = manager_on(&backend);
    assert_eq!(
        reloaded.model().labels(),
        labels(&["Milk", "Eggs", "Bread", "apples"])
    );
    assert!(reloaded.model().controls_visible());
}

#[test]
fn test_empty_store_loads_empty_list() {
    let backend = MemoryStore::new();
    let manager = manager_on(&backend);

    assert!(manager.model().is_empty());
    assert!(!manager.model().controls_visible());
    assert!(manager.dialogs().alerts().is_empty());
}

#[test]
fn test_duplicate_submit_rejected() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);

    submit(&mut manager, "Milk").unwrap();
    let err = submit(&mut manager, "Milk").unwrap_err();

    assert!(matches!(err, ListError::DuplicateItem(ref label) if label == "Milk"));
    assert_eq!(manager.model().labels(), labels(&["Milk"]));
    assert_eq!(manager.store().fetch_items().unwrap(), labels(&["Milk"]));
    assert_eq!(manager.dialogs().last_alert(), Some("Item already added"));
}

#[test]
fn test_duplicate_check_is_case_sensitive() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);

    submit(&mut manager, "Milk").unwrap();
    submit(&mut manager, "milk").unwrap();
    assert_eq!(manager.model().labels(), labels(&["Milk", "milk"]));
}

#[test]
fn test_empty_submit_rejected() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    submit(&mut manager, "Milk").unwrap();

    let err = submit(&mut manager, "").unwrap_err();
    assert!(matches!(err, ListError::EmptyInput));
    assert_eq!(manager.model().len(), 1);
    assert_eq!(manager.dialogs().last_alert(), Some("Please add an item"));

    // Also while editing: the edit stays in progress
    manager.dispatch(UiEvent::LabelClicked { index: 0 }).unwrap();
    let err = submit(&mut manager, "").unwrap_err();
    assert!(matches!(err, ListError::EmptyInput));
    assert_eq!(manager.model().len(), 1);
    assert_eq!(manager.edit_target(), Some(0));
}

#[test]
fn test_edit_replaces_item() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    submit(&mut manager, "Milk").unwrap();
    submit(&mut manager, "Eggs").unwrap();

    manager.dispatch(UiEvent::LabelClicked { index: 0 }).unwrap();
    assert_eq!(manager.model().input(), "Milk");
    assert_eq!(manager.model().submit_mode(), SubmitMode::Update);

    submit(&mut manager, "Bread").unwrap();

    let shown = manager.model().labels();
    assert_eq!(shown.len(), 2);
    assert!(!shown.contains(&"Milk".to_string()));
    assert_eq!(shown.iter().filter(|l| *l == "Bread").count(), 1);
    assert_eq!(manager.store().fetch_items().unwrap(), shown);

    assert!(!manager.is_editing());
    assert_eq!(manager.model().submit_mode(), SubmitMode::Add);
    assert_eq!(manager.model().input(), "");
}

#[test]
fn test_remove_confirmed_and_declined() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    submit(&mut manager, "Milk").unwrap();
    submit(&mut manager, "Eggs").unwrap();

    manager.dialogs_mut().push_answer(false);
    let err = manager.dispatch(UiEvent::DeleteClicked { index: 0 }).unwrap_err();
    assert!(matches!(err, ListError::Unconfirmed));
    assert_eq!(manager.model().labels(), labels(&["Milk", "Eggs"]));
    assert_eq!(manager.store().fetch_items().unwrap(), labels(&["Milk", "Eggs"]));

    manager.dispatch(UiEvent::DeleteClicked { index: 0 }).unwrap();
    assert_eq!(manager.model().labels(), labels(&["Eggs"]));
    assert_eq!(manager.store().fetch_items().unwrap(), labels(&["Eggs"]));
    assert_eq!(manager.dialogs().confirmations(), &["Are you sure?".to_string(), "Are you sure?".to_string()]);
}

#[test]
fn test_remove_last_item_hides_controls() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    submit(&mut manager, "Milk").unwrap();
    assert!(manager.model().controls_visible());

    manager.dispatch(UiEvent::DeleteClicked { index: 0 }).unwrap();
    assert!(!manager.model().controls_visible());
    assert_eq!(backend.raw("items").as_deref(), Some("[]"));
}

#[test]
fn test_clear_all_empties_both_layers() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    for item in ["Milk", "Eggs", "Bread"] {
        submit(&mut manager, item).unwrap();
    }
    manager.dispatch(UiEvent::LabelClicked { index: 1 }).unwrap();

    manager.dispatch(UiEvent::ClearAllClicked).unwrap();

    assert!(manager.model().is_empty());
    assert!(manager.store().fetch_items().unwrap().is_empty());
    assert!(!backend.contains_key("items"));
    assert!(!manager.model().controls_visible());
    assert!(!manager.is_editing());
}

#[test]
fn test_filter_is_non_destructive() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    for item in ["Milk", "Eggs", "Oat Milk"] {
        submit(&mut manager, item).unwrap();
    }

    manager.dispatch(UiEvent::FilterChanged("MILK".to_string())).unwrap();
    let visible: Vec<&str> = manager
        .model()
        .visible_rows()
        .map(|(_, row)| row.label.as_str())
        .collect();
    assert_eq!(visible, vec!["Milk", "Oat Milk"]);

    manager.dispatch(UiEvent::FilterChanged("zzz".to_string())).unwrap();
    assert_eq!(manager.model().visible_count(), 0);
    assert_eq!(manager.model().len(), 3);
    assert_eq!(
        manager.store().fetch_items().unwrap(),
        labels(&["Milk", "Eggs", "Oat Milk"])
    );

    manager.dispatch(UiEvent::FilterChanged(String::new())).unwrap();
    assert_eq!(manager.model().visible_count(), 3);
}

#[test]
fn test_visibility_threshold() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    assert!(!manager.model().controls_visible());

    submit(&mut manager, "Milk").unwrap();
    assert_eq!(manager.model().len(), 1);
    assert!(manager.model().controls_visible());

    manager.dispatch(UiEvent::ClearAllClicked).unwrap();
    assert!(!manager.model().controls_visible());
}

#[test]
fn test_stored_duplicates_removed_together() {
    let backend = MemoryStore::new();
    let mut manager = manager_on(&backend);
    submit(&mut manager, "Milk").unwrap();
    submit(&mut manager, "Eggs").unwrap();

    // Editing onto an existing label is the one way to get a duplicate
    manager.dispatch(UiEvent::LabelClicked { index: 0 }).unwrap();
    submit(&mut manager, "Eggs").unwrap();
    assert_eq!(manager.store().fetch_items().unwrap(), labels(&["Eggs", "Eggs"]));

    manager.dispatch(UiEvent::DeleteClicked { index: 0 }).unwrap();
    assert_eq!(manager.model().labels(), labels(&["Eggs"]));
    assert!(manager.store().fetch_items().unwrap().is_empty());
}
