/// Everything the user can ask for, collected while drawing a frame and
/// applied once drawing is done.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Navigation
    ChooseFolder,
    NavigateUp,
    NavigateInto(usize),
    Select(Option<usize>),
    SelectDelta(i32), // +1/-1 for arrow keys

    // Listing
    SetShowHidden(bool),

    // Selected entry
    Export,
    OpenInSystem,

    // Error handling
    DismissError,
}
