//! The displayed list and the state of the controls around it
//!
//! Front-ends render from a [`ListModel`]; only the List Manager mutates it.

/// What the submit control currently does. Purely visual, the edit target
/// itself lives in the List Manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Add,
    Update,
}

impl SubmitMode {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitMode::Add => "Add Item",
            SubmitMode::Update => "Update Item",
        }
    }
}

/// One displayed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub label: String,
    /// Hidden by the filter
    pub hidden: bool,
    /// Marked as the item being edited
    pub editing: bool,
}

impl ItemRow {
    fn new(label: String) -> Self {
        Self {
            label,
            hidden: false,
            editing: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListModel {
    rows: Vec<ItemRow>,
    controls_visible: bool,
    submit_mode: SubmitMode,
    input: String,
    filter: String,
}

impl Default for ListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ListModel {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            controls_visible: false,
            submit_mode: SubmitMode::Add,
            input: String::new(),
            filter: String::new(),
        }
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ItemRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Labels in display order, hidden rows included
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }

    /// Rows not hidden by the filter, with their index in the full list
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &ItemRow)> {
        self.rows.iter().enumerate().filter(|(_, row)| !row.hidden)
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.hidden).count()
    }

    pub fn append_row(&mut self, label: impl Into<String>) {
        self.rows.push(ItemRow::new(label.into()));
    }

    pub fn remove_row(&mut self, index: usize) -> Option<ItemRow> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    pub fn set_row_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.hidden = hidden;
        }
    }

    /// Mark `index` as the row being edited and unmark every other row
    pub fn mark_editing(&mut self, index: Option<usize>) {
        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.editing = Some(idx) == index;
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.editing)
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    pub fn submit_mode(&self) -> SubmitMode {
        self.submit_mode
    }

    pub fn set_submit_mode(&mut self, mode: SubmitMode) {
        self.submit_mode = mode;
    }

    /// Contents of the add/edit text field
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Contents of the filter field
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_editing_is_single_slot() {
        let mut model = ListModel::new();
        model.append_row("Milk");
        model.append_row("Eggs");
        model.append_row("Bread");

        model.mark_editing(Some(0));
        model.mark_editing(Some(2));
        assert_eq!(model.editing_index(), Some(2));
        assert_eq!(model.rows().iter().filter(|r| r.editing).count(), 1);

        model.mark_editing(None);
        assert_eq!(model.editing_index(), None);
    }

    #[test]
    fn test_visible_rows_skip_hidden() {
        let mut model = ListModel::new();
        model.append_row("Milk");
        model.append_row("Eggs");
        model.set_row_hidden(0, true);
        // Out of range is ignored
        model.set_row_hidden(5, true);

        let visible: Vec<_> = model.visible_rows().map(|(idx, row)| (idx, row.label.as_str())).collect();
        assert_eq!(visible, vec![(1, "Eggs")]);
        assert_eq!(model.visible_count(), 1);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_remove_row_out_of_range() {
        let mut model = ListModel::new();
        model.append_row("Milk");
        assert!(model.remove_row(3).is_none());
        assert_eq!(model.remove_row(0).map(|r| r.label), Some("Milk".to_string()));
        assert!(model.is_empty());
    }

    #[test]
    fn test_submit_mode_labels() {
        assert_eq!(SubmitMode::Add.label(), "Add Item");
        assert_eq!(SubmitMode::Update.label(), "Update Item");
    }
}
