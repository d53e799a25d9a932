// Keyboard input for FileSpy

use crate::app::FileSpy;
use crate::message::Message;
use eframe::egui;

impl FileSpy {
    /// Maps key presses to messages. Keys are ignored while a text field
    /// has focus or the error window is open.
    pub fn handle_input(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        if self.export_error.is_some() {
            if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape))
            {
                messages.push(Message::DismissError);
            }
            return;
        }
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
            messages.push(Message::SelectDelta(1));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
            messages.push(Message::SelectDelta(-1));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            if let Some(idx) = self.navigator.selected_index() {
                messages.push(Message::NavigateInto(idx));
            }
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Backspace)) {
            messages.push(Message::NavigateUp);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            messages.push(Message::Select(None));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Period) && i.modifiers.command && i.modifiers.shift)
        {
            messages.push(Message::SetShowHidden(!self.navigator.show_hidden()));
        }
    }
}

/// Next row after moving `delta` from `current`, wrapping at both ends.
pub fn step_selection(current: Option<usize>, delta: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let new_index = match current {
        Some(current) => {
            let new = current as i64 + delta as i64;
            if new < 0 {
                len - 1 // Wrap to bottom
            } else if new >= len as i64 {
                0 // Wrap to top
            } else {
                new as usize
            }
        }
        None => 0,
    };
    Some(new_index)
}
