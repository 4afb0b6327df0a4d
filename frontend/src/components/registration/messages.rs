pub enum Msg {
    SetName(String),
    SetPhone(String),
    SetEmail(String),
    SetMembership(bool),
    SetGroup(String),
    SetFoodItem(String),
    SetDrinkItem(String),
    SetBringingGift(bool),
    /// A file was picked (or the picker was cleared).
    FileSelected(Option<web_sys::File>),
    /// The proof upload for `generation` settled.
    UploadFinished {
        generation: u64,
        result: Result<String, String>,
    },
    Submit,
    SubmitFinished(Result<(), String>),
}
