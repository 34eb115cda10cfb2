mod anthropic;
pub(crate) mod wire;

pub use anthropic::{AnalyzerOptions, AnthropicAnalyzer};

use crate::{EncodedFrame, Verdict};

use std::future::Future;

/// Decides whether a screen snapshot matches the declared task.
///
/// Implementations never fail: any error becomes [`Verdict::OnTask`].
pub trait TaskJudge {
    /// Judge one frame against `task` using `api_key`.
    fn analyze<'a>(
        &'a self,
        frame: &'a EncodedFrame,
        task: &'a str,
        api_key: &'a str,
    ) -> impl Future<Output = Verdict> + Send + 'a;
}
