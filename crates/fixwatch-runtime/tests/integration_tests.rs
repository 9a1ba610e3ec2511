//! Integration tests for fixwatch-runtime
//!
//! These tests drive the polling runtime against a scripted gateway with
//! tokio's paused clock, so every timer fires deterministically.

mod scenarios {
    mod polling;
    mod teardown;
}
