//! Interaction states for button-like controls.
//!
//! The state functions in this module are pure: they derive a single
//! appearance state from the raw [`InteractionInputs`]. [`ButtonModel`] owns
//! those inputs for one button and keeps the derived state current.

mod button_model;
mod state;

pub use button_model::ButtonModel;
pub use state::{
    ButtonInteractionState, InteractionInputs, RadioButtonInteractionState,
    ToggleInteractionState, button_interaction_state, radio_button_interaction_state,
    toggle_interaction_state,
};
