use super::physics::{is_roll_in, is_roll_out};
use crate::geometry::{Finger, KeyInfo};

#[derive(Debug, Default)]
pub struct FlowAnalysis {
    pub is_roll_reversal: bool,   // Ring -> Pinkie -> Middle (or mirrored)
    pub is_row_change_roll: bool, // Monotonic roll sweeping top -> home -> bottom (or reverse)
}

/// `k1` is the oldest keystroke, `k3` the current one.
pub fn analyze_flow(k1: &KeyInfo, k2: &KeyInfo, k3: &KeyInfo) -> FlowAnalysis {
    use Finger::*;
    let mut res = FlowAnalysis::default();

    if k1.hand != k2.hand || k2.hand != k3.hand {
        return res;
    }

    res.is_roll_reversal = matches!(
        (k1.finger, k2.finger, k3.finger),
        (Ring, Pinkie, Middle) | (Middle, Pinkie, Ring)
    );

    let sweeps_rows = (k3.row_offset < 0 && k2.row_offset == 0 && k1.row_offset > 0)
        || (k3.row_offset > 0 && k2.row_offset == 0 && k1.row_offset < 0);
    let monotonic = (is_roll_in(k1.finger, k2.finger) && is_roll_in(k2.finger, k3.finger))
        || (is_roll_out(k1.finger, k2.finger) && is_roll_out(k2.finger, k3.finger));
    res.is_row_change_roll = sweeps_rows && monotonic;

    res
}
