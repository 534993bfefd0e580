/// How non-string literals are treated when the resolved field is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StringCoercion {
    /// Numbers and booleans are rendered as text (`20` becomes `"20"`).
    #[default]
    Stringify,
    /// Only string literals are accepted.
    Strict,
}

/// Options controlling how a [`RuleSet`](super::RuleSet) is compiled.
///
/// ```
/// use sifter::{CompileOptions, StringCoercion};
///
/// let options = CompileOptions::new().string_coercion(StringCoercion::Strict);
/// assert_eq!(options.string_coercion, StringCoercion::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub struct CompileOptions {
    pub string_coercion: StringCoercion,
}

impl CompileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn string_coercion(mut self, mode: StringCoercion) -> Self {
        self.string_coercion = mode;
        self
    }
}
