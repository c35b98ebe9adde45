use super::key::FieldKey;

/// One entry of a choice field's dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub text: String,
    pub value: i64,
}

impl FieldOption {
    pub fn new(text: impl Into<String>, value: i64) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Boolean,
    /// Autocompleted pick from `options`; `allow_create` offers a "create" entry
    Choice {
        options: Vec<FieldOption>,
        allow_create: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    /// Typed text plus the option id it resolved to, if any
    Choice { text: String, held: Option<i64> },
}

impl FieldValue {
    pub fn empty_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Boolean => FieldValue::Bool(false),
            FieldKind::Choice { .. } => FieldValue::Choice {
                text: String::new(),
                held: None,
            },
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default_value: FieldValue,
    pub value: FieldValue,
}

impl Field {
    fn new(key: FieldKey, label: &'static str, kind: FieldKind) -> Self {
        let empty = FieldValue::empty_for(&kind);
        Self {
            key,
            label,
            kind,
            required: false,
            default_value: empty.clone(),
            value: empty,
        }
    }

    pub fn text(key: FieldKey, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: FieldKey, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn date(key: FieldKey, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn boolean(key: FieldKey, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Boolean)
    }

    pub fn choice(key: FieldKey, label: &'static str, options: Vec<FieldOption>) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Choice {
                options,
                allow_create: false,
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allow_create(mut self) -> Self {
        if let FieldKind::Choice {
            ref mut allow_create,
            ..
        } = self.kind
        {
            *allow_create = true;
        }
        self
    }

    /// Set both the default and the current value
    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = value.clone();
        self.value = value;
        self
    }

    pub fn with_text_default(self, text: impl Into<String>) -> Self {
        let text = text.into();
        let value = match self.kind {
            FieldKind::Choice { .. } => FieldValue::Choice { text, held: None },
            _ => FieldValue::Text(text),
        };
        self.with_default(value)
    }

    /// Default to the option holding `value`, if present
    pub fn with_selected_default(self, value: i64) -> Self {
        let option = self.options().iter().find(|o| o.value == value).cloned();
        match option {
            Some(option) => self.with_default(FieldValue::Choice {
                text: option.text,
                held: Some(option.value),
            }),
            None => self,
        }
    }

    pub fn options(&self) -> &[FieldOption] {
        match &self.kind {
            FieldKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, FieldKind::Boolean)
    }

    pub fn allows_create(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Choice {
                allow_create: true,
                ..
            }
        )
    }

    /// Text the user is editing (empty for booleans)
    pub fn input(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) | FieldValue::Choice { text, .. } => text,
            FieldValue::Bool(_) => "",
        }
    }

    pub fn held(&self) -> Option<i64> {
        match self.value {
            FieldValue::Choice { held, .. } => held,
            _ => None,
        }
    }

    pub fn checked(&self) -> bool {
        self.value.as_bool().unwrap_or(false)
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Bool(true) => "[x]".to_string(),
            FieldValue::Bool(false) => "[ ]".to_string(),
            FieldValue::Text(text) | FieldValue::Choice { text, .. } => text.clone(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(text) => text.push(c),
            FieldValue::Choice { text, held } => {
                text.push(c);
                *held = None;
            }
            FieldValue::Bool(_) => {}
        }
    }

    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(text) => {
                text.pop();
            }
            FieldValue::Choice { text, held } => {
                text.pop();
                *held = None;
            }
            FieldValue::Bool(_) => {}
        }
    }

    pub fn clear(&mut self) {
        self.value = FieldValue::empty_for(&self.kind);
    }

    pub fn set_checked(&mut self, checked: bool) {
        if let FieldValue::Bool(ref mut b) = self.value {
            *b = checked;
        }
    }

    pub fn toggle(&mut self) {
        let checked = self.checked();
        self.set_checked(!checked);
    }

    pub fn select(&mut self, option: &FieldOption) {
        if self.is_choice() {
            self.value = FieldValue::Choice {
                text: option.text.clone(),
                held: Some(option.value),
            };
        }
    }

    pub fn push_option(&mut self, option: FieldOption) {
        if let FieldKind::Choice {
            ref mut options, ..
        } = self.kind
        {
            options.push(option);
        }
    }
}
