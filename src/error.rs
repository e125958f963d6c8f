use thiserror::Error;

/// Errors raised while normalizing a batch of raw work items.
///
/// Malformed `fields` payloads never produce an error — they degrade to
/// default values. The only hard failure is a record with no usable id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The raw item at `index` has no `id`, or its `id` is neither a JSON
    /// string nor a number.
    #[error("work item at index {index} has no usable id")]
    MissingIdentifier { index: usize },
}
