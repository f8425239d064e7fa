#![allow(dead_code)]

pub use stepgraph_test_utils::{builders, fixtures, init_tracing, recording_sink, with_timeout};
