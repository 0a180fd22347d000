//! JSONL trail writer and replayer.
//!
//! The trail is the durable record of every successful command. It lives in
//! `{data_dir}/trail.jsonl` and the task store is rebuilt from it on start.

pub mod replayer;
pub mod writer;

pub use replayer::{ReplaySummary, TrailReplayer};
pub use writer::TrailWriter;
