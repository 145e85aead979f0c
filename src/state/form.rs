#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Only digits are accepted.
    pub numeric: bool,
}

/// A small stack of labelled text inputs with one focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl InputForm {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| FormField { label, value: String::new(), numeric: false })
                .collect(),
            focus: 0,
        }
    }

    pub fn with_numeric(mut self, indices: &[usize]) -> Self {
        for &i in indices {
            if let Some(field) = self.fields.get_mut(i) {
                field.numeric = true;
            }
        }
        self
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Returns whether the character was accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return false;
        };
        if c.is_control() || (field.numeric && !c.is_ascii_digit()) {
            return false;
        }
        field.value.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.fields
            .get_mut(self.focus)
            .is_some_and(|f| f.value.pop().is_some())
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    /// Blank only the given fields, leaving focus alone.
    pub fn clear_fields(&mut self, indices: &[usize]) {
        for &i in indices {
            self.set_value(i, "");
        }
    }
}
