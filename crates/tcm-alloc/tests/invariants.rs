//! Randomized invariants over arbitrary op sequences.

use proptest::prelude::*;
use tcm_alloc::{ScanPolicy, Tiler, TilerConfig};
use tcm_core::{Alignment, Point, TcmError};
use tcm_test_utils::check_consistent;
use tcm_test_utils::fixtures::{apply, op_stream, Op};

const W: u16 = 24;
const H: u16 = 12;

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1..=W / 2, 1..=H / 2, prop_oneof![
            6 => Just(Alignment::None),
            1 => Just(Alignment::Align32),
            1 => Just(Alignment::Align64),
        ])
            .prop_map(|(width, height, alignment)| Op::Reserve2d { width, height, alignment }),
        2 => (1..=u32::from(W) * 3).prop_map(|slots| Op::Reserve1d { slots }),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

fn arb_config() -> impl Strategy<Value = TilerConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0..=W, 0..=H).prop_map(
        |(restrict, x_limiter, y_limiter, dx, dy)| {
            let scan = ScanPolicy {
                x_limiter,
                y_limiter,
                ..ScanPolicy::default()
            };
            TilerConfig::new(W, H)
                .with_divider(Point::new(dx, dy))
                .with_restrict_1d(restrict)
                .with_scan(scan)
        },
    )
}

proptest! {
    #[test]
    fn slot_map_and_registry_agree(
        config in arb_config(),
        ops in prop::collection::vec(arb_op(), 1..60),
    ) {
        let tiler = Tiler::with_config(config).unwrap();
        let mut live = Vec::new();
        for op in ops {
            let before = tiler.snapshot();
            match apply(&tiler, &mut live, op) {
                Ok(()) => {}
                Err(TcmError::NoRoom { .. }) => prop_assert_eq!(tiler.snapshot(), before),
                Err(e) => prop_assert!(false, "{:?} failed: {}", op, e),
            }
            prop_assert_eq!(check_consistent(&tiler), Ok(()));
            prop_assert_eq!(tiler.stats().live_areas, live.len());
        }
        for area in live {
            prop_assert_eq!(tiler.free(area), Ok(()));
        }
        prop_assert_eq!(tiler.stats().busy_slots, 0);
    }

    #[test]
    fn aligned_blocks_start_on_stride(seed in any::<u64>()) {
        let tiler = Tiler::init(160, 20, None).unwrap();
        let mut live = Vec::new();
        for op in op_stream(seed, 120, 160, 20) {
            if let Op::Reserve2d { alignment, .. } = op {
                if apply(&tiler, &mut live, op).is_ok() {
                    let area = live[live.len() - 1];
                    prop_assert_eq!(area.start().x % alignment.stride(), 0);
                }
            } else {
                let _ = apply(&tiler, &mut live, op);
            }
        }
    }
}
