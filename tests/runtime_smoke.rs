//! End-to-end runtime smoke test (headless).
//!
//! Starts the runtime with `FUNDSEA_TEST_HEADLESS=1` so terminal setup is
//! bypassed, waits briefly, and asserts it neither panics nor errors.

use std::time::Duration;

use clap::Parser;
use fundsea::args::Args;

#[tokio::test(flavor = "multi_thread")]
async fn runtime_smoke_headless_starts_without_panic() {
    unsafe {
        std::env::set_var("FUNDSEA_TEST_HEADLESS", "1");
    }

    let args = Args::parse_from(["fundsea", "--base-url", "http://127.0.0.1:1/api"]);
    let handle = tokio::spawn(async { fundsea::app::run(args).await });

    tokio::time::sleep(Duration::from_millis(50)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e:?}");
                }
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
        return;
    }

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e:?}");
            }
        }
        Err(join_err) => assert!(join_err.is_cancelled(), "task must cancel cleanly"),
    }
}
