/// Rejected configuration. Raised synchronously by the session setters;
/// the previous configuration stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No tags configured")]
    NoTags,
    #[error("Tag trigger must be exactly one character, got {tag:?}")]
    InvalidTrigger { tag: String },
    #[error("Tag trigger {0:?} is whitespace and would end every tag it starts")]
    WhitespaceTrigger(char),
    #[error("Tag trigger {0:?} is configured more than once")]
    DuplicateTrigger(char),
    #[error("Editable surface is not attached")]
    InvalidContainer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordTrackerError {
    #[error("Not composing a tag")]
    NotComposing,
}
