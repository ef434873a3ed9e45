/// Errors from the expression tokenizer.
///
/// `at` is a byte offset into the input, pointing at the first
/// non-whitespace character the failing parser looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    /// A decimal number literal was required.
    #[error("expected number literal at byte {at}")]
    ExpectedNumber { at: usize },

    /// A binary operator was required.
    #[error("expected one of '-', '+', '&', '|', '^' at byte {at}")]
    ExpectedOperator { at: usize },
}

pub type Result<T> = std::result::Result<T, ExprError>;
