//! Segmented passcode input: a fixed row of single-digit fields that behave as
//! one widget. Focus moves forward as digits are typed, backward on backspace
//! in an empty field, and a pasted code is spread across the row.

/// Keys the input reacts to on `keydown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Backspace,
    ArrowLeft,
    ArrowRight,
    Digit(char),
    Other,
}

/// Whether the host should run the key's default behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Default,
    Prevented,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeInput {
    fields: Vec<String>,
    focused: Option<usize>,
    selected: bool,
    error: bool,
}

impl CodeInput {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            fields: vec![String::new(); len],
            focused: None,
            selected: false,
            error: false,
        }
    }

    /// Handles an `input` event: `value` is the field's content after the edit.
    /// Anything but digits is reverted by dropping the last character.
    pub fn handle_input(&mut self, index: usize, value: &str) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };

        self.error = false;

        if !value.chars().all(|c| c.is_ascii_digit()) {
            let mut reverted = value.to_string();
            reverted.pop();
            *field = reverted;
            return;
        }

        *field = value.to_string();

        if value.chars().count() == 1 && index + 1 < self.fields.len() {
            self.focus_field(index + 1);
        }
    }

    /// Types one character into the focused field the way a one-character
    /// field would: it replaces a selection and is dropped when the field is
    /// already full. A non-digit is rejected and the field keeps its content.
    pub fn type_char(&mut self, ch: char) {
        let Some(index) = self.focused else {
            return;
        };

        if !ch.is_ascii_digit() {
            self.error = false;
            return;
        }

        let mut value = if self.selected {
            String::new()
        } else {
            self.fields[index].clone()
        };
        self.selected = false;

        if !value.is_empty() {
            return;
        }

        value.push(ch);
        self.handle_input(index, &value);
    }

    /// Handles a `keydown` event on field `index`.
    pub fn handle_keydown(&mut self, index: usize, key: Key) -> KeyOutcome {
        if index >= self.fields.len() {
            return KeyOutcome::Default;
        }

        match key {
            Key::Backspace if self.fields[index].is_empty() && index > 0 => {
                self.focus_field(index - 1);
                KeyOutcome::Default
            }
            Key::ArrowLeft if index > 0 => {
                self.focus_field(index - 1);
                KeyOutcome::Prevented
            }
            Key::ArrowRight if index + 1 < self.fields.len() => {
                self.focus_field(index + 1);
                KeyOutcome::Prevented
            }
            _ => KeyOutcome::Default,
        }
    }

    /// Presses a key on the focused field, running the default behaviour the
    /// handler did not prevent.
    pub fn press_key(&mut self, key: Key) {
        let Some(index) = self.focused else {
            return;
        };
        let was_empty = self.fields[index].is_empty();

        if self.handle_keydown(index, key) == KeyOutcome::Prevented {
            return;
        }

        match key {
            Key::Backspace if !was_empty => {
                self.selected = false;
                self.handle_input(index, "");
            }
            Key::Digit(ch) => self.type_char(ch),
            _ => {}
        }
    }

    /// Spreads the digits of `text` over the fields starting at the first one,
    /// then focuses the first empty field, or the last field if none is empty.
    pub fn handle_paste(&mut self, text: &str) {
        if self.fields.is_empty() {
            return;
        }

        let digits = text
            .trim()
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.fields.len());

        for (field, digit) in self.fields.iter_mut().zip(digits) {
            *field = digit.to_string();
        }

        let focus = self
            .fields
            .iter()
            .position(String::is_empty)
            .unwrap_or(self.fields.len() - 1);
        self.focus_field(focus);
    }

    /// Focuses field `index` and selects its content.
    pub fn focus_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focused = Some(index);
            self.selected = !self.fields[index].is_empty();
        }
    }

    /// Concatenation of all fields in order; shorter than the field count when
    /// some fields are empty.
    #[must_use]
    pub fn value(&self) -> String {
        self.fields.concat()
    }

    /// Empties every field and focuses the first one.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus();
    }

    pub fn set_error(&mut self) {
        self.error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = false;
    }

    pub fn focus(&mut self) {
        self.focus_field(0);
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error
    }

    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_a_digit_advances_focus() {
        let mut input = CodeInput::new(5);
        input.focus();
        input.type_char('1');
        assert_eq!(input.fields()[0], "1");
        assert_eq!(input.focused(), Some(1));
    }

    #[test]
    fn last_field_does_not_advance() {
        let mut input = CodeInput::new(5);
        input.focus_field(4);
        input.type_char('9');
        assert_eq!(input.focused(), Some(4));
        assert_eq!(input.value(), "9");
    }

    #[test]
    fn letters_are_rejected() {
        let mut input = CodeInput::new(5);
        input.focus();
        input.type_char('a');
        assert_eq!(input.fields()[0], "");
        assert_eq!(input.focused(), Some(0));

        input.handle_input(2, "7x");
        assert_eq!(input.fields()[2], "7");
    }

    #[test]
    fn letter_keeps_existing_digit() {
        let mut input = CodeInput::new(5);
        input.handle_input(0, "3");
        input.focus();
        input.set_error();
        input.type_char('a');
        assert_eq!(input.fields()[0], "3");
        assert_eq!(input.focused(), Some(0));
        assert!(!input.has_error());

        input.type_char('4');
        assert_eq!(input.fields()[0], "4");
        assert_eq!(input.focused(), Some(1));
    }

    #[test]
    fn focused_content_is_replaced_by_typing() {
        let mut input = CodeInput::new(5);
        input.handle_input(0, "3");
        input.focus();
        input.type_char('8');
        assert_eq!(input.fields()[0], "8");
        assert_eq!(input.focused(), Some(1));
    }

    #[test]
    fn backspace_on_empty_field_moves_back() {
        let mut input = CodeInput::new(5);
        input.focus_field(2);
        assert_eq!(input.handle_keydown(2, Key::Backspace), KeyOutcome::Default);
        assert_eq!(input.focused(), Some(1));

        input.focus();
        input.handle_keydown(0, Key::Backspace);
        assert_eq!(input.focused(), Some(0));
    }

    #[test]
    fn backspace_on_filled_field_clears_it_in_place() {
        let mut input = CodeInput::new(5);
        input.handle_paste("12");
        input.focus_field(1);
        input.press_key(Key::Backspace);
        assert_eq!(input.value(), "1");
        assert_eq!(input.focused(), Some(1));

        input.press_key(Key::Backspace);
        assert_eq!(input.focused(), Some(0));
    }

    #[test]
    fn arrows_move_without_mutation() {
        let mut input = CodeInput::new(5);
        input.handle_paste("123");
        input.focus_field(1);

        assert_eq!(input.handle_keydown(1, Key::ArrowRight), KeyOutcome::Prevented);
        assert_eq!(input.focused(), Some(2));
        assert_eq!(input.handle_keydown(2, Key::ArrowLeft), KeyOutcome::Prevented);
        assert_eq!(input.focused(), Some(1));
        assert_eq!(input.value(), "123");

        assert_eq!(input.handle_keydown(0, Key::ArrowLeft), KeyOutcome::Default);
        assert_eq!(input.handle_keydown(4, Key::ArrowRight), KeyOutcome::Default);
    }

    #[test]
    fn paste_fills_fields_and_ignores_overflow() {
        let mut input = CodeInput::new(5);
        input.handle_paste("12345678");
        assert_eq!(input.fields(), ["1", "2", "3", "4", "5"]);
        assert_eq!(input.focused(), Some(4));
    }

    #[test]
    fn paste_strips_non_digits_and_focuses_first_empty() {
        let mut input = CodeInput::new(5);
        input.handle_paste("  1-2 3\n");
        assert_eq!(input.value(), "123");
        assert_eq!(input.focused(), Some(3));
    }

    #[test]
    fn paste_overwrites_left_to_right() {
        let mut input = CodeInput::new(5);
        input.handle_input(3, "9");
        input.handle_paste("12");
        assert_eq!(input.fields(), ["1", "2", "", "9", ""]);
        assert_eq!(input.focused(), Some(2));
    }

    #[test]
    fn value_joins_without_separator() {
        let mut input = CodeInput::new(5);
        input.handle_input(0, "1");
        input.handle_input(1, "2");
        input.handle_input(3, "4");
        assert_eq!(input.fields(), ["1", "2", "", "4", ""]);
        assert_eq!(input.value(), "124");
    }

    #[test]
    fn clear_empties_and_focuses_first() {
        let mut input = CodeInput::new(5);
        input.handle_paste("54321");
        input.clear();
        assert_eq!(input.value(), "");
        assert_eq!(input.focused(), Some(0));
    }

    #[test]
    fn input_clears_error_marker() {
        let mut input = CodeInput::new(5);
        input.set_error();
        assert!(input.has_error());
        input.handle_input(0, "1");
        assert!(!input.has_error());

        input.set_error();
        input.clear_error();
        assert!(!input.has_error());
    }

    #[test]
    fn empty_input_ignores_events() {
        let mut input = CodeInput::new(0);
        input.handle_paste("123");
        input.clear();
        input.type_char('1');
        assert!(input.is_empty());
        assert_eq!(input.focused(), None);
    }
}
