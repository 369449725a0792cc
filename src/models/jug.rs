//! The classic "DieHard" capacity-jug puzzle: a 5-unit jug and a 3-unit jug,
//! no markings, measure out exactly 4 units. Used as spec §8 scenarios 1-2.

use crate::engine::Engine;
use crate::error::CheckError;
use crate::model::{either, Model};

const CAP_BIG: u8 = 5;
const CAP_SMALL: u8 = 3;

/// `big` and `small` are the current contents of each jug, in units.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Jug {
    pub big: u8,
    pub small: u8,
}

impl Jug {
    pub fn new() -> Self {
        Jug { big: 0, small: 0 }
    }
}

impl Default for Jug {
    fn default() -> Self {
        Self::new()
    }
}

/// The six DieHard actions: FillBig, FillSmall, EmptyBig, EmptySmall,
/// BigToSmall, SmallToBig. Each is an unconditional `either` branch whose
/// closure only mutates when the action actually changes something; a
/// no-op branch re-emits the current state, which the engine silently
/// treats as a duplicate (spec §4.5: "a branch that chooses not to emit
/// simply returns without producing a state").
///
/// Factored out of `Model::generate` so both `Jug` (invariant: `big != 4`,
/// spec §8 scenario 1) and `JugReachability` (invariant: `true`, scenario 2)
/// drive the identical transition relation.
fn jug_actions<M: Model>(
    engine: &mut Engine<M>,
    state: &mut M,
    get: fn(&M) -> Jug,
    set: fn(&mut M, Jug),
) -> Result<(), CheckError> {
    let apply = |branch: fn(Jug) -> Jug| {
        move |s: &mut M, _: &mut Engine<M>| {
            set(s, branch(get(s)));
            Ok(())
        }
    };
    either(engine, state, apply(|j| Jug { big: CAP_BIG, ..j }))?;
    either(engine, state, apply(|j| Jug { small: CAP_SMALL, ..j }))?;
    either(engine, state, apply(|j| Jug { big: 0, ..j }))?;
    either(engine, state, apply(|j| Jug { small: 0, ..j }))?;
    either(
        engine,
        state,
        apply(|j| {
            let pour = j.big.min(CAP_SMALL - j.small);
            Jug {
                big: j.big - pour,
                small: j.small + pour,
            }
        }),
    )?;
    either(
        engine,
        state,
        apply(|j| {
            let pour = j.small.min(CAP_BIG - j.big);
            Jug {
                small: j.small - pour,
                big: j.big + pour,
            }
        }),
    )?;
    Ok(())
}

impl Model for Jug {
    fn satisfy_invariant(&self) -> bool {
        self.big != 4
    }

    fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError> {
        jug_actions(engine, self, |j| *j, |s, j| *s = j)
    }

    fn display(&self) -> String {
        format!("big={}, small={}", self.big, self.small)
    }
}

/// Same transition relation as [`Jug`], but with the invariant trivially
/// `true` so the engine enumerates the entire reachable state space instead
/// of stopping at the first `big == 4` state (spec §8 scenario 2).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct JugReachability(pub Jug);

impl JugReachability {
    pub fn new() -> Self {
        JugReachability(Jug::new())
    }
}

impl Default for JugReachability {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for JugReachability {
    fn satisfy_invariant(&self) -> bool {
        true
    }

    fn generate(&mut self, engine: &mut Engine<Self>) -> Result<(), CheckError> {
        jug_actions(engine, self, |w| w.0, |w, j| w.0 = j)
    }

    fn display(&self) -> String {
        self.0.display()
    }
}
