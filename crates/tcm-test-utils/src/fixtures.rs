//! Seeded op streams for randomized tests and benchmarks.
//!
//! Streams are generated from a 64-bit LCG, so the same seed always yields
//! the same sequence of operations on any platform.

use tcm_alloc::Tiler;
use tcm_core::{Alignment, Area, TcmError};

/// One container operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Reserve a 2D block.
    Reserve2d {
        width: u16,
        height: u16,
        alignment: Alignment,
    },
    /// Reserve a 1D run.
    Reserve1d { slots: u32 },
    /// Free the live area at this position (modulo the live count).
    Free(usize),
}

/// Deterministic LCG over `u64`.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 16
    }

    /// Uniform-ish value in `1..=max`.
    pub fn up_to(&mut self, max: u64) -> u64 {
        self.next_u64() % max.max(1) + 1
    }
}

/// Generate `len` operations sized for a `width` x `height` container.
///
/// Roughly half the ops are 2D reservations (one in eight aligned), a
/// quarter are 1D runs and a quarter are frees. Block sides stay within a
/// quarter of the container so most requests can succeed.
pub fn op_stream(seed: u64, len: usize, width: u16, height: u16) -> Vec<Op> {
    let mut rng = Lcg::new(seed);
    let max_w = u64::from((width / 4).max(1));
    let max_h = u64::from((height / 4).max(1));
    let max_run = u64::from(width) * 2;
    (0..len)
        .map(|_| match rng.next_u64() % 8 {
            0..=3 => {
                let alignment = match rng.next_u64() % 8 {
                    0 => Alignment::Align32,
                    1 => Alignment::Align64,
                    _ => Alignment::None,
                };
                Op::Reserve2d {
                    width: rng.up_to(max_w) as u16,
                    height: rng.up_to(max_h) as u16,
                    alignment,
                }
            }
            4 | 5 => Op::Reserve1d {
                slots: rng.up_to(max_run) as u32,
            },
            _ => Op::Free(rng.next_u64() as usize),
        })
        .collect()
}

/// Apply one op, tracking the live areas it creates and frees.
///
/// `Free` with nothing live is a no-op. Returns the op's outcome.
pub fn apply(tiler: &Tiler, live: &mut Vec<Area>, op: Op) -> Result<(), TcmError> {
    match op {
        Op::Reserve2d {
            width,
            height,
            alignment,
        } => {
            live.push(tiler.reserve_2d(width, height, alignment)?);
            Ok(())
        }
        Op::Reserve1d { slots } => {
            live.push(tiler.reserve_1d(slots)?);
            Ok(())
        }
        Op::Free(n) => {
            if live.is_empty() {
                return Ok(());
            }
            let area = live.swap_remove(n % live.len());
            tiler.free(area)
        }
    }
}

/// Apply every op in `ops`, ignoring `NoRoom`. Returns the areas still live.
///
/// # Panics
///
/// On any error other than `NoRoom`.
pub fn run_ops(tiler: &Tiler, ops: &[Op]) -> Vec<Area> {
    let mut live = Vec::new();
    for &op in ops {
        match apply(tiler, &mut live, op) {
            Ok(()) | Err(TcmError::NoRoom { .. }) => {}
            Err(e) => panic!("{op:?} failed: {e}"),
        }
    }
    live
}
