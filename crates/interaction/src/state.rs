//! Hover, pin and legend state
//!
//! Hover and pin are orthogonal: a pinned datum stays pinned while the
//! pointer moves across other data. Transitions are pure; the only side
//! effects are the [`Effect`]s they return, which [`InteractionMachine`]
//! forwards to callbacks.
//!
//! [`InteractionMachine`]: crate::InteractionMachine

use serde::{Deserialize, Serialize};

/// Interaction behaviour options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionConfig {
    /// Clicking the pinned datum again unpins it
    pub reset_on_double_click: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reset_on_double_click: true,
        }
    }
}

impl InteractionConfig {
    pub fn with_reset_on_double_click(mut self, reset: bool) -> Self {
        self.reset_on_double_click = reset;
        self
    }
}

/// Current interaction state of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState<D> {
    pub hovered: Option<D>,
    pub pinned: Option<D>,
    /// Colour group highlighted from the legend
    pub selected_color_group: Option<String>,
}

impl<D> Default for InteractionState<D> {
    fn default() -> Self {
        Self {
            hovered: None,
            pinned: None,
            selected_color_group: None,
        }
    }
}

impl<D> InteractionState<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neither hovering nor pinned
    pub fn is_idle(&self) -> bool {
        self.hovered.is_none() && self.pinned.is_none()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// The datum a tooltip should describe: the pinned one, else the hovered one
    pub fn focused(&self) -> Option<&D> {
        self.pinned.as_ref().or(self.hovered.as_ref())
    }
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent<D> {
    /// Pointer moved onto a datum
    Hover(D),
    /// Pointer left the plot area
    Leave,
    /// Datum clicked
    Click(D),
    /// Legend swatch hovered (`Some`) or left (`None`)
    LegendHover(Option<String>),
    /// Explicit reset from outside the chart
    Reset,
    /// The dataset was replaced
    DataChanged,
}

/// Externally observable consequence of a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<D> {
    /// The hovered datum changed; `None` when cleared
    Hover(Option<D>),
    /// The pinned datum changed or was clicked again; `None` when cleared
    Pin(Option<D>),
    /// The legend selection changed
    ColorGroup(Option<String>),
}

/// Apply `event` to `state`, returning the next state and its effects.
///
/// An event that changes nothing yields no effects, except a click on the
/// already pinned datum with reset disabled, which re-announces the pin.
pub fn transition<D>(
    state: &InteractionState<D>,
    event: InteractionEvent<D>,
    config: &InteractionConfig,
) -> (InteractionState<D>, Vec<Effect<D>>)
where
    D: Clone + PartialEq,
{
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        InteractionEvent::Hover(datum) => {
            if next.hovered.as_ref() != Some(&datum) {
                next.hovered = Some(datum.clone());
                effects.push(Effect::Hover(Some(datum)));
            }
        }
        InteractionEvent::Leave => {
            if next.hovered.take().is_some() {
                effects.push(Effect::Hover(None));
            }
        }
        InteractionEvent::Click(datum) => {
            if next.pinned.as_ref() == Some(&datum) {
                if config.reset_on_double_click {
                    next.pinned = None;
                    effects.push(Effect::Pin(None));
                } else {
                    effects.push(Effect::Pin(Some(datum)));
                }
            } else {
                next.pinned = Some(datum.clone());
                effects.push(Effect::Pin(Some(datum)));
            }
        }
        InteractionEvent::LegendHover(group) => {
            if next.selected_color_group != group {
                next.selected_color_group = group.clone();
                effects.push(Effect::ColorGroup(group));
            }
        }
        InteractionEvent::Reset => {
            clear_pointer_state(&mut next, &mut effects);
        }
        InteractionEvent::DataChanged => {
            clear_pointer_state(&mut next, &mut effects);
            if next.selected_color_group.take().is_some() {
                effects.push(Effect::ColorGroup(None));
            }
        }
    }

    (next, effects)
}

fn clear_pointer_state<D>(state: &mut InteractionState<D>, effects: &mut Vec<Effect<D>>) {
    if state.hovered.take().is_some() {
        effects.push(Effect::Hover(None));
    }
    if state.pinned.take().is_some() {
        effects.push(Effect::Pin(None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(
        state: &InteractionState<&'static str>,
        event: InteractionEvent<&'static str>,
    ) -> (InteractionState<&'static str>, Vec<Effect<&'static str>>) {
        transition(state, event, &InteractionConfig::default())
    }

    #[test]
    fn test_hover_then_leave() {
        let idle = InteractionState::new();
        let (hovering, effects) = apply(&idle, InteractionEvent::Hover("a"));
        assert_eq!(hovering.hovered, Some("a"));
        assert_eq!(effects, vec![Effect::Hover(Some("a"))]);

        let (moved, effects) = apply(&hovering, InteractionEvent::Hover("b"));
        assert_eq!(moved.hovered, Some("b"));
        assert_eq!(effects, vec![Effect::Hover(Some("b"))]);

        let (left, effects) = apply(&moved, InteractionEvent::Leave);
        assert!(left.is_idle());
        assert_eq!(effects, vec![Effect::Hover(None)]);
    }

    #[test]
    fn test_hover_same_datum_is_silent() {
        let (hovering, _) = apply(&InteractionState::new(), InteractionEvent::Hover("a"));
        let (again, effects) = apply(&hovering, InteractionEvent::Hover("a"));
        assert_eq!(again, hovering);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_click_same_datum_toggles_off() {
        let (pinned, effects) = apply(&InteractionState::new(), InteractionEvent::Click("a"));
        assert_eq!(pinned.pinned, Some("a"));
        assert_eq!(effects, vec![Effect::Pin(Some("a"))]);

        let (idle, effects) = apply(&pinned, InteractionEvent::Click("a"));
        assert!(idle.is_idle());
        assert_eq!(effects, vec![Effect::Pin(None)]);
    }

    #[test]
    fn test_click_same_datum_without_reset_stays_pinned() {
        let config = InteractionConfig::default().with_reset_on_double_click(false);
        let (pinned, _) = transition(&InteractionState::new(), InteractionEvent::Click("a"), &config);
        let (still, effects) = transition(&pinned, InteractionEvent::Click("a"), &config);
        assert_eq!(still.pinned, Some("a"));
        assert_eq!(effects, vec![Effect::Pin(Some("a"))]);
    }

    #[test]
    fn test_click_other_datum_repins_directly() {
        let (pinned, _) = apply(&InteractionState::new(), InteractionEvent::Click("a"));
        let (repinned, effects) = apply(&pinned, InteractionEvent::Click("b"));
        assert_eq!(repinned.pinned, Some("b"));
        assert_eq!(effects, vec![Effect::Pin(Some("b"))]);
    }

    #[test]
    fn test_pin_survives_hover_changes() {
        let (pinned, _) = apply(&InteractionState::new(), InteractionEvent::Click("a"));
        let (hovering, _) = apply(&pinned, InteractionEvent::Hover("b"));
        let (left, _) = apply(&hovering, InteractionEvent::Leave);
        assert_eq!(left.pinned, Some("a"));
        assert_eq!(left.focused(), Some(&"a"));
    }

    #[test]
    fn test_reset_clears_pin_and_hover() {
        let (pinned, _) = apply(&InteractionState::new(), InteractionEvent::Click("a"));
        let (hovering, _) = apply(&pinned, InteractionEvent::Hover("b"));
        let (legend, _) = apply(&hovering, InteractionEvent::LegendHover(Some("north".into())));

        let (reset, effects) = apply(&legend, InteractionEvent::Reset);
        assert!(reset.is_idle());
        assert_eq!(reset.selected_color_group.as_deref(), Some("north"));
        assert_eq!(effects, vec![Effect::Hover(None), Effect::Pin(None)]);

        let (fresh, effects) = apply(&legend, InteractionEvent::DataChanged);
        assert_eq!(fresh, InteractionState::new());
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn test_legend_hover() {
        let (selected, effects) = apply(
            &InteractionState::new(),
            InteractionEvent::LegendHover(Some("north".into())),
        );
        assert_eq!(selected.selected_color_group.as_deref(), Some("north"));
        assert_eq!(effects, vec![Effect::ColorGroup(Some("north".into()))]);

        let (cleared, effects) = apply(&selected, InteractionEvent::LegendHover(None));
        assert_eq!(cleared.selected_color_group, None);
        assert_eq!(effects, vec![Effect::ColorGroup(None)]);
    }

    #[test]
    fn test_reset_when_idle_is_silent() {
        let (state, effects) = apply(&InteractionState::new(), InteractionEvent::Reset);
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }
}
