/// Login form UX
///
/// Small stateful helpers behind the login page: the password visibility
/// toggle, the first-field focus hint, and the submit lockout that stops
/// the button being pressed twice while the post is in flight. Pages
/// without these elements simply never construct the helpers.

/// Input type for the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Password,
    Text,
}

impl FieldKind {
    pub fn as_input_type(&self) -> &'static str {
        match self {
            FieldKind::Password => "password",
            FieldKind::Text => "text",
        }
    }
}

/// The Show/Hide toggle next to the password input.
#[derive(Debug, Clone, Copy)]
pub struct PasswordToggle {
    kind: FieldKind,
}

impl PasswordToggle {
    pub fn new() -> Self {
        Self {
            kind: FieldKind::Password,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The toggle button label for the current state.
    pub fn button_label(&self) -> &'static str {
        match self.kind {
            FieldKind::Password => "Show",
            FieldKind::Text => "Hide",
        }
    }

    /// Flip visibility; returns the new input type.
    pub fn toggle(&mut self) -> FieldKind {
        self.kind = match self.kind {
            FieldKind::Password => FieldKind::Text,
            FieldKind::Text => FieldKind::Password,
        };
        self.kind
    }
}

impl Default for PasswordToggle {
    fn default() -> Self {
        Self::new()
    }
}

/// Disables the submit button on first submit and swaps its label.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitLockout {
    engaged: bool,
}

impl SubmitLockout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time; later submits are already locked out.
    pub fn engage(&mut self) -> bool {
        if self.engaged {
            false
        } else {
            self.engaged = true;
            true
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn button_label(&self) -> &'static str {
        if self.engaged {
            "Logging in..."
        } else {
            "Log In"
        }
    }
}

/// The login page helpers, built from what the page actually renders.
#[derive(Debug, Clone, Copy)]
pub struct LoginForm {
    pub password_toggle: Option<PasswordToggle>,
    pub lockout: SubmitLockout,
    /// Name of the field to focus on load, when the form has one.
    pub focus_field: Option<&'static str>,
}

impl LoginForm {
    pub fn new(has_password_field: bool, has_username_field: bool) -> Self {
        Self {
            password_toggle: has_password_field.then(PasswordToggle::new),
            lockout: SubmitLockout::new(),
            focus_field: has_username_field.then_some("username"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_toggle_round_trip() {
        let mut toggle = PasswordToggle::new();
        assert_eq!(toggle.button_label(), "Show");
        assert_eq!(toggle.kind().as_input_type(), "password");

        assert_eq!(toggle.toggle(), FieldKind::Text);
        assert_eq!(toggle.button_label(), "Hide");

        assert_eq!(toggle.toggle(), FieldKind::Password);
        assert_eq!(toggle.button_label(), "Show");
    }

    #[test]
    fn test_lockout_engages_once() {
        let mut lockout = SubmitLockout::new();
        assert_eq!(lockout.button_label(), "Log In");

        assert!(lockout.engage());
        assert!(!lockout.engage());
        assert_eq!(lockout.button_label(), "Logging in...");
    }

    #[test]
    fn test_form_without_password_field() {
        let form = LoginForm::new(false, true);
        assert!(form.password_toggle.is_none());
        assert_eq!(form.focus_field, Some("username"));
    }
}
