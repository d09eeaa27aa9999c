//! Per-datum opacity derived from interaction state

use crate::error::{InteractionError, InteractionResult};
use crate::state::InteractionState;
use serde::{Deserialize, Serialize};

/// Rules for fading data that is not in focus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpacityPolicy {
    /// Opacity of data outside the legend selection
    pub dimmed_opacity: f64,
    /// Also dim every datum except the pinned one while a datum is pinned
    pub dim_unpinned: bool,
}

impl Default for OpacityPolicy {
    fn default() -> Self {
        Self {
            dimmed_opacity: 0.3,
            dim_unpinned: false,
        }
    }
}

impl OpacityPolicy {
    pub fn new(dimmed_opacity: f64) -> InteractionResult<Self> {
        let policy = Self {
            dimmed_opacity,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_dim_unpinned(mut self, dim: bool) -> Self {
        self.dim_unpinned = dim;
        self
    }

    pub fn validate(&self) -> InteractionResult<()> {
        if (0.0..=1.0).contains(&self.dimmed_opacity) {
            Ok(())
        } else {
            Err(InteractionError::InvalidOpacity(self.dimmed_opacity))
        }
    }

    /// Opacity of `datum` whose colour group is `color_group`.
    ///
    /// Full opacity unless a legend group is selected and differs from the
    /// datum's group, or (with `dim_unpinned`) another datum is pinned.
    pub fn opacity<D: PartialEq>(
        &self,
        state: &InteractionState<D>,
        datum: &D,
        color_group: Option<&str>,
    ) -> f64 {
        if let Some(selected) = state.selected_color_group.as_deref() {
            if color_group != Some(selected) {
                return self.dimmed_opacity;
            }
        }
        if self.dim_unpinned {
            if let Some(pinned) = &state.pinned {
                if pinned != datum {
                    return self.dimmed_opacity;
                }
            }
        }
        1.0
    }
}
