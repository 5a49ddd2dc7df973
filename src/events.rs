/// Notifications a front-end sends to the List Manager
///
/// Row indices refer to positions in the full displayed list, hidden rows
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Startup: populate the list from storage
    Load,
    /// The add/edit text field changed
    InputChanged(String),
    /// Submit the text field (add, or update while editing)
    Submit,
    /// The delete affordance of a row was activated
    DeleteClicked { index: usize },
    /// The label of a row was activated, entering edit mode
    LabelClicked { index: usize },
    ClearAllClicked,
    /// The filter field changed
    FilterChanged(String),
}

impl UiEvent {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Load => "load",
            UiEvent::InputChanged(_) => "input_changed",
            UiEvent::Submit => "submit",
            UiEvent::DeleteClicked { .. } => "delete_clicked",
            UiEvent::LabelClicked { .. } => "label_clicked",
            UiEvent::ClearAllClicked => "clear_all_clicked",
            UiEvent::FilterChanged(_) => "filter_changed",
        }
    }
}
