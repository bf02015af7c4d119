//! Integration tests for the ready-made controls.

use std::sync::Arc;
use std::time::Duration;

use horizon_controls::prelude::*;
use horizon_controls::widget::value::EndReason;
use parking_lot::Mutex;

#[test]
fn test_combo_box_button_opens_list_and_takes_selection() {
    let focus = Arc::new(FocusManager::new());
    let mut button = ButtonModel::new();
    let mut list = ComboBoxListBox::new(
        button.id(),
        vec![
            ComboBoxItem::new("Metric"),
            ComboBoxItem::new("Imperial"),
            ComboBoxItem::new("Nautical"),
        ],
        focus.clone(),
    );

    let opened = Arc::new(Mutex::new(0));
    let opened_clone = opened.clone();
    button.clicked.connect(move |_| *opened_clone.lock() += 1);

    focus.set_focus(button.id(), FocusReason::Tab);
    button.set_focused(true);
    let mut press = KeyPressEvent::new(Key::Space, KeyboardModifiers::NONE);
    button.handle_key_press(&mut press);
    let mut release = KeyReleaseEvent::new(Key::Space, KeyboardModifiers::NONE);
    button.handle_key_release(&mut release);
    assert_eq!(*opened.lock(), 1);

    list.show(Some(0));
    assert_ne!(focus.focused_widget(), Some(button.id()));

    let mut end = KeyPressEvent::new(Key::End, KeyboardModifiers::NONE);
    assert!(list.handle_key_press(&mut end));
    assert!(end.base.is_accepted());
    let mut enter = KeyPressEvent::new(Key::Enter, KeyboardModifiers::NONE);
    list.handle_key_press(&mut enter);

    assert_eq!(list.selected_index(), Some(2));
    assert_eq!(focus.focused_widget(), Some(button.id()));
    assert!(!list.is_visible());
}

#[test]
fn test_slider_announces_after_keyboard_interaction() {
    let queue = Arc::new(UtteranceQueue::new());
    let clock = Arc::new(ManualClock::new());
    let options = ValueHandlerOptions::default().with_value_text(|v| format!("{v} percent"));
    let mut slider = AccessibleSlider::new(
        "Opacity",
        50.0,
        ValueRange::new(0.0, 100.0).unwrap(),
        options,
        queue.clone(),
        clock.clone(),
    )
    .unwrap();

    let ends = Arc::new(Mutex::new(Vec::new()));
    let ends_clone = ends.clone();
    slider
        .handler()
        .interaction_ended
        .connect(move |end| ends_clone.lock().push(end.reason));

    let mut down = KeyPressEvent::new(Key::PageUp, KeyboardModifiers::NONE);
    slider.handle_key_press(&mut down);
    let mut up = KeyReleaseEvent::new(Key::PageUp, KeyboardModifiers::NONE);
    slider.handle_key_release(&mut up);

    assert_eq!(slider.value(), 60.0);
    assert_eq!(*ends.lock(), vec![EndReason::KeysReleased]);

    clock.advance(Duration::from_millis(700));
    assert!(slider.poll());
    assert_eq!(queue.pop().map(|r| r.text), Some("60 percent".to_string()));
}

#[test]
fn test_slider_focus_loss_mid_drag_of_keys() {
    let mut slider = AccessibleSlider::new(
        "Speed",
        1.0,
        ValueRange::new(0.0, 5.0).unwrap(),
        ValueHandlerOptions::default(),
        Arc::new(UtteranceQueue::new()),
        Arc::new(ManualClock::new()),
    )
    .unwrap();

    let mut down = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE);
    slider.handle_key_press(&mut down);
    slider.handle_focus_out(&FocusOutEvent::new(FocusReason::Mouse));
    assert!(!slider.handler().is_active());

    // A fresh key press after the blur starts a new session.
    let mut again = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE);
    slider.handle_key_press(&mut again);
    assert!(slider.handler().is_active());
    assert_eq!(slider.handler().value_at_start(), Some(2.0));
    assert_eq!(slider.value(), 3.0);
}

#[test]
fn test_radio_group_roving_selection() {
    let focus = Arc::new(FocusManager::new());
    let mut group = RadioButtonGroup::new(["Walk", "Bike", "Drive"], focus.clone());
    group.select(0);
    group.focus_button(0);

    let mut right = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE);
    assert!(group.handle_key_press(&mut right));

    assert_eq!(group.selected_index(), Some(1));
    assert_eq!(focus.focused_widget(), group.button_id(1));
    assert_eq!(group.interaction_state(1), Some(RadioButtonInteractionState::Selected));
    assert_eq!(group.interaction_state(0), Some(RadioButtonInteractionState::Deselected));
}
