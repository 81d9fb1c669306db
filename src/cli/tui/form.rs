//! Task creation modal state

use chrono::Local;

use crate::domain::due::parse_due;
use crate::domain::{DueDateError, NewTask, Priority};

/// Field of the creation modal that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Priority,
    DueDate,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::DueDate,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
            FormField::DueDate => FormField::Priority,
        }
    }

    /// True for fields that take typed text
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Priority)
    }
}

/// Inputs of the "new task" modal
#[derive(Debug, Clone, PartialEq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due: String,
    pub focus: FormField,
    default_priority: Priority,
}

impl CreateForm {
    pub fn new(default_priority: Priority) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: default_priority,
            due: String::new(),
            focus: FormField::Title,
            default_priority,
        }
    }

    /// Clears every field back to its initial value
    pub fn reset(&mut self) {
        *self = Self::new(self.default_priority);
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Moves the priority one step up or down, wrapping around
    pub fn cycle_priority(&mut self, forward: bool) {
        let len = Priority::ALL.len();
        let index = self.priority.index();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        self.priority = Priority::ALL[next];
    }

    /// Builds creation input; an empty due field means no due date
    pub fn to_new_task(&self) -> Result<NewTask, DueDateError> {
        let mut input = NewTask::titled(self.title.clone())
            .with_description(self.description.clone())
            .with_priority(self.priority);

        if !self.due.trim().is_empty() {
            input = input.with_due_date(parse_due(&self.due, Local::now())?);
        }

        Ok(input)
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due),
            FormField::Priority => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut CreateForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = CreateForm::new(Priority::Low);
        type_text(&mut form, "Buy milk");
        form.focus = form.focus.next();
        type_text(&mut form, "2 liters");
        form.pop_char();

        assert_eq!(form.title, "Buy milk");
        assert_eq!(form.description, "2 liter");
    }

    #[test]
    fn priority_field_ignores_text() {
        let mut form = CreateForm::new(Priority::Low);
        form.focus = FormField::Priority;
        type_text(&mut form, "abc");

        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert!(form.due.is_empty());
    }

    #[test]
    fn priority_cycles_both_ways() {
        let mut form = CreateForm::new(Priority::Low);
        form.cycle_priority(true);
        assert_eq!(form.priority, Priority::Medium);
        form.cycle_priority(false);
        form.cycle_priority(false);
        assert_eq!(form.priority, Priority::High);
    }

    #[test]
    fn focus_cycles() {
        let start = FormField::Title;
        assert_eq!(start.next().next().next().next(), start);
        assert_eq!(start.prev(), FormField::DueDate);
        assert!(!FormField::Priority.is_text());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = CreateForm::new(Priority::Medium);
        type_text(&mut form, "x");
        form.cycle_priority(true);
        form.focus = FormField::DueDate;
        type_text(&mut form, "tomorrow");

        form.reset();

        assert_eq!(form, CreateForm::new(Priority::Medium));
    }

    #[test]
    fn builds_new_task() {
        let mut form = CreateForm::new(Priority::High);
        type_text(&mut form, "Pay rent");
        form.focus = FormField::DueDate;
        type_text(&mut form, "tomorrow");

        let input = form.to_new_task().unwrap();
        assert_eq!(input.title, "Pay rent");
        assert_eq!(input.priority, Priority::High);
        assert!(input.due_date.is_some());
    }

    #[test]
    fn bad_due_date_is_reported() {
        let mut form = CreateForm::new(Priority::Low);
        form.focus = FormField::DueDate;
        type_text(&mut form, "someday");

        assert!(form.to_new_task().is_err());
    }
}
