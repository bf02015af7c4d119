//! Ready-made controls.
//!
//! - [`AccessibleSlider`]: a range control driven by keyboard, pointer and
//!   assistive technology
//! - [`ComboBoxListBox`]: the popup list of a combo box
//! - [`RadioButtonGroup`]: mutually exclusive choices with roving focus

mod combo_box_list_box;
mod radio_group;
mod slider;

pub use combo_box_list_box::{ComboBoxItem, ComboBoxListBox};
pub use radio_group::RadioButtonGroup;
pub use slider::AccessibleSlider;
