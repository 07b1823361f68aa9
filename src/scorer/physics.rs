use crate::geometry::{Finger, KeyInfo};

#[derive(Debug, Default, PartialEq)]
pub struct KeyInteraction {
    pub is_same_hand: bool,

    // Same finger
    pub is_sfb: bool,
    pub is_thumb_pair: bool,

    // Stretches
    pub is_scissor: bool,
    pub is_lateral_stretch: bool,
    pub is_pinky_ring_stretch: bool,

    // Rolls (bigram)
    pub is_roll_in: bool,
    pub is_roll_out: bool,

    /// `current.row - prior.row`
    pub row_diff: i32,
}

#[inline]
pub fn same_key(a: &KeyInfo, b: &KeyInfo) -> bool {
    a.hand == b.hand && a.row == b.row && a.col == b.col
}

/// Moving towards the thumb by at most two fingers. Any other finger rolls into
/// the thumb; the index is only entered from the thumb or itself.
#[inline]
pub fn is_roll_in(prior: Finger, current: Finger) -> bool {
    use Finger::*;
    match current {
        Thumb => prior != Thumb,
        Index => matches!(prior, Thumb | Index),
        Middle => matches!(prior, Ring | Pinkie),
        Ring => prior == Pinkie,
        Pinkie => false,
    }
}

/// Moving away from the thumb by at most two fingers.
#[inline]
pub fn is_roll_out(prior: Finger, current: Finger) -> bool {
    use Finger::*;
    match current {
        Thumb => false,
        Index => prior == Thumb,
        Middle => matches!(prior, Thumb | Index),
        Ring => matches!(prior, Index | Middle),
        Pinkie => matches!(prior, Middle | Ring),
    }
}

/// Top row and bottom row on either side of the home row.
#[inline]
fn crosses_home(a: &KeyInfo, b: &KeyInfo) -> bool {
    (a.row_offset < 0 && b.row_offset > 0) || (a.row_offset > 0 && b.row_offset < 0)
}

fn is_lateral_stretch(prior: &KeyInfo, current: &KeyInfo) -> bool {
    use Finger::*;
    if !crosses_home(prior, current) {
        return false;
    }
    match (prior.finger, current.finger) {
        (Ring, Pinkie) | (Pinkie, Ring) | (Middle, Ring) | (Ring, Middle) => true,
        (Middle | Ring, Index) => current.row_offset < 0 && prior.row_offset > 0,
        _ => false,
    }
}

/// Index and ring pressing on different rows.
fn is_scissor(prior: &KeyInfo, current: &KeyInfo) -> bool {
    matches!(
        (prior.finger, current.finger),
        (Finger::Index, Finger::Ring) | (Finger::Ring, Finger::Index)
    ) && prior.row != current.row
}

/// Classifies the transition from `prior` to `current`.
pub fn analyze_interaction(prior: &KeyInfo, current: &KeyInfo) -> KeyInteraction {
    let mut res = KeyInteraction::default();
    if prior.hand != current.hand {
        return res;
    }
    res.is_same_hand = true;
    res.row_diff = current.row as i32 - prior.row as i32;

    if same_key(prior, current) {
        res.is_thumb_pair = current.finger == Finger::Thumb;
        return res;
    }

    res.is_thumb_pair = prior.finger == Finger::Thumb && current.finger == Finger::Thumb;

    if prior.finger == current.finger {
        res.is_sfb = true;
        return res;
    }

    res.is_roll_in = is_roll_in(prior.finger, current.finger);
    res.is_roll_out = is_roll_out(prior.finger, current.finger);
    res.is_scissor = is_scissor(prior, current);
    res.is_lateral_stretch = is_lateral_stretch(prior, current);
    res.is_pinky_ring_stretch = matches!(
        (prior.finger, current.finger),
        (Finger::Ring, Finger::Pinkie) | (Finger::Pinkie, Finger::Ring)
    ) && current.row < prior.row;

    res
}
