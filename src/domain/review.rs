/// Extracted review content: the body text and the receipt/visit date.
///
/// Missing page elements surface here as sentinel strings (see `outcome`),
/// never as errors, so both fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContent {
    pub text: String,
    pub date: String,
}
