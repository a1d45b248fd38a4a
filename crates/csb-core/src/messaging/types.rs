/// Telegram rejects a whole message whose button carries more callback data than this.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Inline keyboard (buttons) attached to a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    /// One button per row; `callback_data` is `{prefix}{label}`.
    ///
    /// `None` when any button's data exceeds [`MAX_CALLBACK_DATA_LEN`] bytes.
    pub fn one_per_row<S: AsRef<str>>(prefix: &str, labels: &[S]) -> Option<Self> {
        let buttons = labels
            .iter()
            .map(|label| {
                let callback_data = format!("{prefix}{}", label.as_ref());
                (callback_data.len() <= MAX_CALLBACK_DATA_LEN).then(|| InlineButton {
                    label: label.as_ref().to_string(),
                    callback_data,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { buttons })
    }
}
