use crate::common::TextInput;

/// Focusable fields on the login screen, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    GoogleToken,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::GoogleToken,
            LoginField::GoogleToken => LoginField::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LoginField::Email => LoginField::GoogleToken,
            LoginField::Password => LoginField::Email,
            LoginField::GoogleToken => LoginField::Password,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub email: TextInput,
    pub password: TextInput,
    /// Google identity token pasted by the user.
    pub google_token: TextInput,
    pub focus: LoginField,
    pub error: Option<String>,
    pub success: Option<String>,
    /// A credential exchange is in flight.
    pub pending: bool,
    /// Bumped on every timed error so a stale clear timer does not wipe a newer one.
    pub(crate) error_generation: u64,
}

impl LoginState {
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::GoogleToken => &mut self.google_token,
        }
    }

    pub fn clear_fields(&mut self) {
        self.email.clear();
        self.password.clear();
        self.google_token.clear();
        self.focus = LoginField::Email;
    }
}
