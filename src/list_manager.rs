use tracing::{debug, info, trace, warn};

use crate::dialogs::Dialogs;
use crate::error::{ListError, StorageError};
use crate::events::UiEvent;
use crate::item_filter::ItemFilter;
use crate::storage::{ItemStore, KeyValueStore};
use crate::view_model::{ListModel, SubmitMode};

/// Question asked before an item is removed
pub const CONFIRM_REMOVE_MESSAGE: &str = "Are you sure?";

/// Owns the displayed list, its persistent mirror and the edit slot
///
/// Every mutating operation updates the displayed list first and the store
/// second, and both agree again before the operation returns. If the store
/// backend fails, the store switches to an in-memory copy of the displayed
/// list and the user is told once; the operation itself still completes.
pub struct ListManager<S, D> {
    model: ListModel,
    store: ItemStore<S>,
    dialogs: D,
    /// Row currently being edited
    edit_target: Option<usize>,
}

impl<S: KeyValueStore, D: Dialogs> ListManager<S, D> {
    pub fn new(store: ItemStore<S>, dialogs: D) -> Self {
        Self {
            model: ListModel::new(),
            store,
            dialogs,
            edit_target: None,
        }
    }

    pub fn model(&self) -> &ListModel {
        &self.model
    }

    pub fn store(&self) -> &ItemStore<S> {
        &self.store
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn edit_target(&self) -> Option<usize> {
        self.edit_target
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    /// Handle one UI event to completion
    ///
    /// User-facing failures are shown through [`Dialogs::alert`] before being
    /// returned; a declined confirmation is returned silently.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), ListError> {
        trace!(target: "list_manager", "Dispatching {}", event.name());

        let result = match event {
            UiEvent::Load => self.load(),
            UiEvent::InputChanged(text) => {
                self.model.set_input(text);
                Ok(())
            }
            UiEvent::Submit => self.submit(),
            UiEvent::DeleteClicked { index } => self.remove(index),
            UiEvent::LabelClicked { index } => {
                self.enter_edit_mode(index);
                Ok(())
            }
            UiEvent::ClearAllClicked => {
                self.clear_all();
                Ok(())
            }
            UiEvent::FilterChanged(text) => {
                self.apply_filter(&text);
                Ok(())
            }
        };

        if let Err(err) = &result {
            info!(target: "list_manager", "Action abandoned: {}", err);
            if err.should_notify() {
                self.dialogs.alert(&err.to_string());
            }
        }

        result
    }

    /// Populate the displayed list from storage, in stored order
    pub fn load(&mut self) -> Result<(), ListError> {
        let had_rows = !self.model.is_empty();
        self.model.clear_rows();
        self.edit_target = None;

        let items = self.read_store(|store| store.fetch_items());
        if items.is_empty() {
            debug!(target: "list_manager", "Nothing stored, starting with an empty list");
            if had_rows {
                self.refresh_visibility();
            }
            return Ok(());
        }

        info!(target: "list_manager", "Loaded {} item(s)", items.len());
        for item in items {
            self.model.append_row(item);
        }
        self.refresh_visibility();
        Ok(())
    }

    /// Add the text field contents, or replace the edited item with them
    pub fn submit(&mut self) -> Result<(), ListError> {
        let label = self.model.input().trim().to_string();
        if label.is_empty() {
            return Err(ListError::EmptyInput);
        }

        match self.edit_target.take() {
            None => {
                if self.read_store(|store| store.contains(&label)) {
                    return Err(ListError::DuplicateItem(label));
                }
            }
            Some(index) => {
                // No duplicate check here: editing onto an existing label is allowed
                self.model.mark_editing(None);
                if let Some(old) = self.model.remove_row(index) {
                    debug!(target: "list_manager", "Replacing '{}' with '{}'", old.label, label);
                    self.write_store(|store| store.remove_item(&old.label).map(|_| ()));
                }
            }
        }

        self.model.append_row(label.clone());
        self.write_store(|store| store.add_item(&label));
        info!(target: "list_manager", "Added '{}'", label);

        self.refresh_visibility();
        Ok(())
    }

    /// Remove the row at `index` after the user confirms
    pub fn remove(&mut self, index: usize) -> Result<(), ListError> {
        let Some(row) = self.model.row(index) else {
            debug!(target: "list_manager", "Ignoring remove of missing row {}", index);
            return Ok(());
        };
        let label = row.label.clone();

        if !self.dialogs.confirm(CONFIRM_REMOVE_MESSAGE) {
            return Err(ListError::Unconfirmed);
        }

        self.model.remove_row(index);
        self.write_store(|store| store.remove_item(&label).map(|_| ()));
        info!(target: "list_manager", "Removed '{}'", label);

        self.refresh_visibility();
        Ok(())
    }

    /// Empty the displayed list and delete the stored key
    pub fn clear_all(&mut self) {
        let count = self.model.len();
        self.model.clear_rows();
        self.write_store(|store| store.clear());
        info!(target: "list_manager", "Cleared {} item(s)", count);

        self.refresh_visibility();
    }

    /// Make the row at `index` the edit target and load its label for editing
    pub fn enter_edit_mode(&mut self, index: usize) {
        let Some(row) = self.model.row(index) else {
            debug!(target: "list_manager", "Ignoring edit of missing row {}", index);
            return;
        };
        let label = row.label.clone();

        self.model.mark_editing(Some(index));
        self.edit_target = Some(index);
        self.model.set_input(label);
        self.model.set_submit_mode(SubmitMode::Update);
        debug!(target: "list_manager", "Editing row {}", index);
    }

    /// Sync control visibility with the row count and leave edit mode
    pub fn refresh_visibility(&mut self) {
        let has_items = !self.model.is_empty();
        self.model.set_controls_visible(has_items);

        self.model.set_submit_mode(SubmitMode::Add);
        self.model.mark_editing(None);
        self.edit_target = None;
        self.model.clear_input();
    }

    /// Show only rows whose label contains `filter`, ignoring case
    pub fn apply_filter(&mut self, filter: &str) {
        self.model.set_filter(filter);
        for index in 0..self.model.len() {
            let visible = self
                .model
                .row(index)
                .map(|row| ItemFilter::matches(&row.label, filter))
                .unwrap_or(false);
            self.model.set_row_hidden(index, !visible);
        }
        trace!(
            target: "list_manager",
            "Filter '{}' shows {} of {} item(s)",
            filter,
            self.model.visible_count(),
            self.model.len()
        );
    }

    fn read_store<T: Default>(
        &mut self,
        op: impl Fn(&ItemStore<S>) -> Result<T, StorageError>,
    ) -> T {
        match op(&self.store) {
            Ok(value) => value,
            Err(err) => {
                self.fall_back_to_memory(err);
                op(&self.store).unwrap_or_default()
            }
        }
    }

    /// The displayed list already holds the intended state when this runs, so
    /// a failed write is not retried: the in-memory copy starts from it.
    fn write_store(&mut self, op: impl FnOnce(&mut ItemStore<S>) -> Result<(), StorageError>) {
        if let Err(err) = op(&mut self.store) {
            self.fall_back_to_memory(err);
        }
    }

    fn fall_back_to_memory(&mut self, err: StorageError) {
        warn!(target: "list_manager", "Storage failed: {}", err);
        self.store.degrade(self.model.labels());
        self.dialogs
            .alert(&ListError::StorageUnavailable(err).to_string());
    }
}
