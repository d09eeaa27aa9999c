//! Stateful wrapper around [`transition`] that invokes callbacks

use crate::state::{transition, Effect, InteractionConfig, InteractionEvent, InteractionState};
use std::fmt;

type Callback<D> = Box<dyn FnMut(Option<&D>)>;

/// Interaction state of one chart instance plus its observers
pub struct InteractionMachine<D> {
    state: InteractionState<D>,
    config: InteractionConfig,
    on_hover: Option<Callback<D>>,
    on_pin: Option<Callback<D>>,
}

impl<D> fmt::Debug for InteractionMachine<D>
where
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionMachine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("on_hover", &self.on_hover.is_some())
            .field("on_pin", &self.on_pin.is_some())
            .finish()
    }
}

impl<D> Default for InteractionMachine<D> {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl<D> InteractionMachine<D> {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: InteractionState::default(),
            config,
            on_hover: None,
            on_pin: None,
        }
    }

    /// Called with the hovered datum, or `None` when hover clears
    pub fn on_hover(mut self, callback: impl FnMut(Option<&D>) + 'static) -> Self {
        self.on_hover = Some(Box::new(callback));
        self
    }

    /// Called with the pinned datum, or `None` when the pin clears
    pub fn on_pin(mut self, callback: impl FnMut(Option<&D>) + 'static) -> Self {
        self.on_pin = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &InteractionState<D> {
        &self.state
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }
}

impl<D: Clone + PartialEq> InteractionMachine<D> {
    /// Apply an event; returns true when the chart needs re-rendering
    pub fn handle(&mut self, event: InteractionEvent<D>) -> bool {
        let (next, effects) = transition(&self.state, event, &self.config);
        self.state = next;

        for effect in &effects {
            match effect {
                Effect::Hover(datum) => {
                    if let Some(callback) = self.on_hover.as_mut() {
                        callback(datum.as_ref());
                    }
                }
                Effect::Pin(datum) => {
                    if let Some(callback) = self.on_pin.as_mut() {
                        callback(datum.as_ref());
                    }
                }
                Effect::ColorGroup(group) => {
                    tracing::trace!(?group, "legend selection changed");
                }
            }
        }
        !effects.is_empty()
    }

    pub fn hover(&mut self, datum: D) -> bool {
        self.handle(InteractionEvent::Hover(datum))
    }

    pub fn leave(&mut self) -> bool {
        self.handle(InteractionEvent::Leave)
    }

    pub fn click(&mut self, datum: D) -> bool {
        self.handle(InteractionEvent::Click(datum))
    }

    pub fn legend_hover(&mut self, group: Option<String>) -> bool {
        self.handle(InteractionEvent::LegendHover(group))
    }

    /// Clear hover and pin, keeping the legend selection
    pub fn reset(&mut self) -> bool {
        self.handle(InteractionEvent::Reset)
    }

    /// Clear everything after the dataset is replaced
    pub fn reset_for_data_change(&mut self) -> bool {
        tracing::debug!("resetting interaction state for new data");
        self.handle(InteractionEvent::DataChanged)
    }
}
