// ── Group selector ──
//
// The navigable control state of a group: an EDM local enum PV whose
// states are the subgroup aliases plus a trailing overview state.

use std::fmt;

/// State appended after the subgroup aliases; selected initially.
pub const OVERVIEW_STATE: &str = "overview";

/// EDM local enum PV that picks which subgroup display is shown.
///
/// Renders as `LOC\\<name>=e:<initial>,<state>,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    name: String,
    states: Vec<String>,
    initial: usize,
}

impl Selector {
    /// Build a selector over `states`, appending [`OVERVIEW_STATE`] and
    /// starting on it.
    pub fn new(name: impl Into<String>, states: impl IntoIterator<Item = String>) -> Self {
        let mut states: Vec<String> = states.into_iter().collect();
        states.push(OVERVIEW_STATE.to_owned());
        let initial = states.len() - 1;
        Self {
            name: name.into(),
            states,
            initial,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Index of the state selected when the screen opens.
    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn state_index(&self, state: &str) -> Option<usize> {
        self.states.iter().position(|s| s == state)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LOC\\\\{}=e:{},{}",
            self.name,
            self.initial,
            self.states.join(",")
        )
    }
}
