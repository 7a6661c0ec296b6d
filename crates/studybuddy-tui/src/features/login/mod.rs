//! Login screen: email/password form and Google identity token exchange.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginField, LoginState};
pub use update::{
    GOOGLE_LOGIN_FAILED, INVALID_CREDENTIALS, LOGIN_SUCCESS, MESSAGE_CLEAR_DELAY,
    MISSING_FIELDS, REDIRECT_DELAY, clear_error, handle_key, handle_login_event, submit,
    submit_google,
};
