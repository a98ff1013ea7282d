//! regex-live - interactive regex tester
//!
//! This crate provides the recompute-and-render pipeline behind the tester:
//! flag handling, pattern compilation, match segmentation, and the
//! coordinator task that serializes edit notifications. The terminal surface
//! lives in the binary.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod coordinator;
pub mod editable;
pub mod flags;
pub mod highlight;
pub mod matcher;
pub mod messages;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::TesterConfig;
pub use coordinator::{Coordinator, Notifier, Session, Surface};
pub use flags::{Flag, FlagSet};
pub use highlight::{HighlightClass, HighlightedSegment, MatchSpan};
pub use matcher::{CompileError, CompiledPattern};
pub use messages::Notification;
