//! Red-light-green-light core library.
//!
//! Screen capture, task-alignment analysis, and the monitoring loop that ties
//! them together. UI concerns (tray glyph, notifications) are reached through
//! the [`StatusSink`] trait so the loop can run headless under test.
//!
//! # Example
//!
//! ```no_run
//! use red_light_core::{
//!     AnalyzerOptions, AnthropicAnalyzer, MonitorSupervisor, Session, StatusSink, Verdict,
//!     XcapScreen,
//! };
//!
//! use std::time::Duration;
//!
//! struct PrintSink;
//!
//! impl StatusSink for PrintSink {
//!     fn show_verdict(&self, verdict: Verdict) {
//!         println!("{}", verdict.glyph());
//!     }
//!
//!     fn alert_off_task(&self, task: &str) {
//!         println!("Remember your focus: {task}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> red_light_core::CoreResult<()> {
//!     let session = Session::new("write report".to_string(), Some("sk-ant-...".to_string()));
//!     let mut supervisor = MonitorSupervisor::new(
//!         XcapScreen::default(),
//!         AnthropicAnalyzer::new(AnalyzerOptions::default())?,
//!         PrintSink,
//!         Duration::from_secs(10),
//!         session,
//!     );
//!
//!     let _ = supervisor.start();
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     supervisor.shutdown(Duration::from_millis(500)).await;
//!     Ok(())
//! }
//! ```

mod analyzer;
mod capture;
mod error;
mod monitor;
mod session;
mod verdict;

pub use {
    analyzer::{AnalyzerOptions, AnthropicAnalyzer, TaskJudge},
    capture::{EncodedFrame, ScreenSource, XcapScreen, encode_frame},
    error::{MonitorError, Result as CoreResult},
    monitor::{MonitorSupervisor, MonitorWorker, StartRefusal, StatusSink, ToggleOutcome},
    session::Session,
    verdict::Verdict,
};

#[cfg(test)]
mod tests;
