/// Binary classification of the user's activity for one monitoring cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Screen activity matches the declared task. Also the fail-open default.
    #[default]
    OnTask,
    /// Screen activity does not match the declared task.
    OffTask,
}

impl Verdict {
    /// Literal token the model is instructed to answer with when on task.
    pub const ON_TASK_TOKEN: &'static str = "ON_TASK";
    /// Literal token the model is instructed to answer with when off task.
    pub const OFF_TASK_TOKEN: &'static str = "OFF_TASK";

    /// Interpret a model reply.
    ///
    /// Exact tokens map directly. Anything else is `OffTask` only when the
    /// reply mentions `OFF_TASK` and never `ON_TASK`; all other replies,
    /// including empty ones, are `OnTask`.
    pub fn from_reply(reply: &str) -> Self {
        let normalized = reply.trim().to_ascii_uppercase();

        match normalized.as_str() {
            Self::ON_TASK_TOKEN => Verdict::OnTask,
            Self::OFF_TASK_TOKEN => Verdict::OffTask,
            _ if normalized.contains(Self::OFF_TASK_TOKEN)
                && !normalized.contains(Self::ON_TASK_TOKEN) =>
            {
                Verdict::OffTask
            }
            _ => Verdict::OnTask,
        }
    }

    /// Status-bar glyph for this verdict.
    pub fn glyph(self) -> &'static str {
        match self {
            Verdict::OnTask => "🟢",
            Verdict::OffTask => "🔴",
        }
    }

    /// Token form, as used in logs.
    pub fn as_token(self) -> &'static str {
        match self {
            Verdict::OnTask => Self::ON_TASK_TOKEN,
            Verdict::OffTask => Self::OFF_TASK_TOKEN,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}
