//! Interaction state tracking for widgets

use bitflags::bitflags;

bitflags! {
    /// Flags describing how a widget is currently being interacted with.
    ///
    /// `NORMAL` and `ENABLED` are derived by [`StateHandler`] and never need to be
    /// set by hand: `ENABLED` mirrors the absence of `DISABLED`, `NORMAL` is set
    /// while the widget is enabled and not hovered, pressed or checked.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InteractionState: u32 {
        const DISABLED = 1 << 0;
        const PRESSED = 1 << 1;
        const CHECKED = 1 << 2;
        const FOCUSED = 1 << 3;
        const HOVERED = 1 << 4;
        const NORMAL = 1 << 5;
        const ENABLED = 1 << 6;
    }
}

impl InteractionState {
    const DERIVED: InteractionState = InteractionState::NORMAL.union(InteractionState::ENABLED);
    const NOT_RESTING: InteractionState = InteractionState::DISABLED
        .union(InteractionState::HOVERED)
        .union(InteractionState::PRESSED)
        .union(InteractionState::CHECKED);

    /// Recompute the derived flags from the input-driven ones
    fn with_derived(self) -> Self {
        let mut state = self.difference(Self::DERIVED);
        if !state.contains(Self::DISABLED) {
            state.insert(Self::ENABLED);
        }
        if !state.intersects(Self::NOT_RESTING) {
            state.insert(Self::NORMAL);
        }
        state
    }
}

/// Owns the interaction state of one widget and tracks whether it needs a redraw.
#[derive(Debug, Clone)]
pub struct StateHandler {
    states: InteractionState,
    redraw: bool,
}

impl Default for StateHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHandler {
    pub fn new() -> Self {
        Self {
            states: InteractionState::empty().with_derived(),
            redraw: false,
        }
    }

    /// Merge `bits` into the current state, touching only the flags in `mask`.
    ///
    /// Returns `true` and raises a redraw request when the state changed.
    pub fn set_state(&mut self, bits: InteractionState, mask: InteractionState) -> bool {
        let merged = (self.states & !mask) | (bits & mask);
        let next = merged.with_derived();
        if next == self.states {
            return false;
        }
        log::debug!("State {:?} -> {:?}", self.states, next);
        self.states = next;
        self.redraw = true;
        true
    }

    /// Set or clear a single group of flags
    pub fn toggle(&mut self, flags: InteractionState, on: bool) -> bool {
        let bits = if on { flags } else { InteractionState::empty() };
        self.set_state(bits, flags)
    }

    pub fn states(&self) -> InteractionState {
        self.states
    }

    pub fn is(&self, flags: InteractionState) -> bool {
        self.states.contains(flags)
    }

    /// Ask for a redraw without a state change (configuration edits)
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Take the pending redraw request, clearing it
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}
