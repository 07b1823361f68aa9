use super::flow::analyze_flow;
use super::physics::analyze_interaction;
use crate::config::PenaltyWeights;
use crate::geometry::{Finger, KeyInfo};
use strum_macros::{Display, EnumIter, EnumString};

/// Keystrokes of one quartad, newest first, with the modifier key held for each.
/// `None` means the character (or its modifier) has no key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Window<'a> {
    pub keys: [Option<&'a KeyInfo>; 4],
    pub mods: [Option<&'a KeyInfo>; 4],
}

impl<'a> Window<'a> {
    #[inline]
    pub fn current(&self) -> Option<&'a KeyInfo> {
        self.keys[0]
    }

    #[inline]
    pub fn prior(&self, n: usize) -> Option<&'a KeyInfo> {
        self.keys.get(n).copied().flatten()
    }

    #[inline]
    pub fn mod_current(&self) -> Option<&'a KeyInfo> {
        self.mods[0]
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display,
)]
pub enum PenaltyRule {
    #[strum(to_string = "Base", serialize = "base")]
    Base,
    #[strum(to_string = "SFB", serialize = "sfb")]
    Sfb,
    #[strum(to_string = "Vertical finger travel", serialize = "vertical_finger_travel")]
    VerticalFingerTravel,
    #[strum(to_string = "Long SFB", serialize = "long_sfb")]
    LongSfb,
    #[strum(to_string = "Lateral stretch", serialize = "lateral_stretch")]
    LateralStretch,
    #[strum(to_string = "Pinky/ring stretch", serialize = "pinky_ring_stretch")]
    PinkyRingStretch,
    #[strum(to_string = "Roll reversal", serialize = "roll_reversal")]
    RollReversal,
    #[strum(to_string = "Hand repetition", serialize = "hand_repetition")]
    HandRepetition,
    #[strum(to_string = "Hand alternation", serialize = "hand_alternation")]
    HandAlternation,
    #[strum(to_string = "Outward roll", serialize = "outward_roll")]
    OutwardRoll,
    #[strum(to_string = "Inward roll", serialize = "inward_roll")]
    InwardRoll,
    #[strum(to_string = "Scissor motion", serialize = "scissor_motion")]
    ScissorMotion,
    #[strum(to_string = "Row change in roll", serialize = "row_change_in_roll")]
    RowChangeInRoll,
    #[strum(to_string = "Base modifier", serialize = "base_modifier")]
    BaseModifier,
    #[strum(to_string = "Same finger modifier", serialize = "same_finger_modifier")]
    SameFingerModifier,
    #[strum(to_string = "Diagonal modifier", serialize = "diagonal_modifier")]
    DiagonalModifier,
    #[strum(to_string = "Modifier stretch", serialize = "modifier_stretch")]
    ModifierStretch,
    #[strum(to_string = "Double tap thumbs", serialize = "double_tap_thumbs")]
    DoubleTapThumbs,
}

impl PenaltyRule {
    /// Number of keystrokes the rule inspects. A rule is only evaluated on
    /// quartads of exactly this length so every n-gram is counted once.
    pub fn arity(self) -> usize {
        use PenaltyRule::*;
        match self {
            Base | BaseModifier | SameFingerModifier | DiagonalModifier | ModifierStretch => 1,
            Sfb | VerticalFingerTravel | LongSfb | LateralStretch | PinkyRingStretch
            | ScissorMotion | InwardRoll | OutwardRoll | DoubleTapThumbs => 2,
            RollReversal | RowChangeInRoll => 3,
            HandRepetition | HandAlternation => 4,
        }
    }

    pub fn weight(self, w: &PenaltyWeights) -> f64 {
        use PenaltyRule::*;
        match self {
            Base => w.base,
            Sfb => w.sfb,
            VerticalFingerTravel => w.vertical_finger_travel,
            LongSfb => w.long_sfb,
            LateralStretch => w.lateral_stretch,
            PinkyRingStretch => w.pinky_ring_stretch,
            RollReversal => w.roll_reversal,
            HandRepetition => w.hand_repetition,
            HandAlternation => w.hand_alternation,
            OutwardRoll => w.outward_roll,
            InwardRoll => w.inward_roll,
            ScissorMotion => w.scissor_motion,
            RowChangeInRoll => w.row_change_in_roll,
            BaseModifier => w.base_modifier,
            SameFingerModifier => w.same_finger_modifier,
            DiagonalModifier => w.diagonal_modifier,
            ModifierStretch => w.modifier_stretch,
            DoubleTapThumbs => w.double_tap_thumbs,
        }
    }

    /// Unweighted cost of one occurrence of `w`. Zero when a needed keystroke is absent.
    pub fn evaluate(self, w: &Window) -> f64 {
        use PenaltyRule::*;
        let hit = |b: bool| if b { 1.0 } else { 0.0 };

        match self {
            Base => w.current().map_or(0.0, |k| k.cost),
            BaseModifier => w.mod_current().map_or(0.0, |m| m.cost),

            SameFingerModifier | DiagonalModifier | ModifierStretch => {
                let (Some(cur), Some(m)) = (w.current(), w.mod_current()) else {
                    return 0.0;
                };
                if cur.hand != m.hand {
                    return 0.0;
                }
                hit(match self {
                    SameFingerModifier => cur.finger == m.finger,
                    DiagonalModifier => (m.row as i32 - cur.row as i32).abs() > 2,
                    _ => {
                        matches!(
                            (cur.finger, m.finger),
                            (Finger::Pinkie, Finger::Index) | (Finger::Index, Finger::Pinkie)
                        ) && !cur.is_home()
                            && !m.is_home()
                    }
                })
            }

            Sfb | VerticalFingerTravel | LongSfb | LateralStretch | PinkyRingStretch
            | ScissorMotion | InwardRoll | OutwardRoll | DoubleTapThumbs => {
                let (Some(cur), Some(prev)) = (w.current(), w.prior(1)) else {
                    return 0.0;
                };
                let ia = analyze_interaction(prev, cur);
                hit(match self {
                    Sfb => ia.is_sfb,
                    VerticalFingerTravel => ia.is_same_hand && ia.row_diff.abs() >= 2,
                    LongSfb => ia.is_sfb && ia.row_diff.abs() >= 2,
                    LateralStretch => ia.is_lateral_stretch,
                    PinkyRingStretch => ia.is_pinky_ring_stretch,
                    ScissorMotion => ia.is_scissor,
                    InwardRoll => ia.is_roll_in,
                    OutwardRoll => ia.is_roll_out,
                    _ => ia.is_thumb_pair,
                })
            }

            RollReversal | RowChangeInRoll => {
                let (Some(cur), Some(p1), Some(p2)) = (w.current(), w.prior(1), w.prior(2)) else {
                    return 0.0;
                };
                let flow = analyze_flow(p2, p1, cur);
                hit(match self {
                    RollReversal => flow.is_roll_reversal,
                    _ => flow.is_row_change_roll,
                })
            }

            HandRepetition | HandAlternation => {
                let (Some(k0), Some(k1), Some(k2), Some(k3)) =
                    (w.current(), w.prior(1), w.prior(2), w.prior(3))
                else {
                    return 0.0;
                };
                hit(match self {
                    HandRepetition => {
                        k0.hand == k1.hand && k1.hand == k2.hand && k2.hand == k3.hand
                    }
                    _ => k0.hand != k1.hand && k1.hand != k2.hand && k2.hand != k3.hand,
                })
            }
        }
    }
}
