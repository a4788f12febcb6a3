//! Shared use of one container from several threads.

use std::sync::Arc;
use std::thread;

use tcm_alloc::Tiler;
use tcm_core::{Alignment, TcmError};
use tcm_test_utils::assert_consistent;
use tcm_test_utils::fixtures::{op_stream, run_ops};

#[test]
fn concurrent_op_streams_keep_state_consistent() {
    let tiler = Arc::new(Tiler::init(128, 64, None).unwrap());
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let tiler = Arc::clone(&tiler);
            thread::spawn(move || run_ops(&tiler, &op_stream(seed, 400, 128, 64)))
        })
        .collect();

    let mut live = 0;
    for h in handles {
        live += h.join().unwrap().len();
    }
    assert_eq!(tiler.stats().live_areas, live);
    assert_consistent(&tiler);
}

#[test]
fn concurrent_reserves_never_overlap() {
    let tiler = Arc::new(Tiler::init(32, 32, None).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tiler = Arc::clone(&tiler);
            thread::spawn(move || {
                let mut got = 0u32;
                loop {
                    match tiler.reserve_2d(2, 2, Alignment::None) {
                        Ok(_) => got += 1,
                        Err(TcmError::NoRoom { .. }) => return got,
                        Err(e) => panic!("unexpected {e}"),
                    }
                }
            })
        })
        .collect();

    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(tiler.stats().busy_slots, total as usize * 4);
    assert_consistent(&tiler);
}
