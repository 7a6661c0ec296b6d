use std::path::PathBuf;

use studybuddy_core::profile::{DashboardStats, UserProfile};

use crate::common::TextInput;

/// Choices offered by the gender field.
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

#[derive(Debug, Default)]
pub struct ProfileState {
    pub profile: UserProfile,
    pub stats: DashboardStats,
    pub modal: Option<ProfileModal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Username, title, bio and avatar.
    EditUser,
    /// Personal information panel.
    EditPersonal,
}

impl ModalKind {
    pub fn title(self) -> &'static str {
        match self {
            ModalKind::EditUser => "Edit Profile",
            ModalKind::EditPersonal => "Edit Personal Information",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ModalField {
    Text {
        label: &'static str,
        input: TextInput,
    },
    /// One of a fixed set of options, cycled with Left/Right.
    Choice {
        label: &'static str,
        options: &'static [&'static str],
        selected: usize,
    },
}

impl ModalField {
    fn text(label: &'static str, value: &str) -> Self {
        ModalField::Text {
            label,
            input: TextInput::with_value(value),
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str], value: &str) -> Self {
        let selected = options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(value))
            .unwrap_or(0);
        ModalField::Choice {
            label,
            options,
            selected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModalField::Text { label, .. } | ModalField::Choice { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ModalField::Text { input, .. } => input.value(),
            ModalField::Choice {
                options, selected, ..
            } => options.get(*selected).copied().unwrap_or_default(),
        }
    }
}

/// An open edit modal holding a draft of the profile fields it edits.
#[derive(Debug, Clone)]
pub struct ProfileModal {
    pub kind: ModalKind,
    pub fields: Vec<ModalField>,
    pub focus: usize,
}

impl ProfileModal {
    /// Opens a modal pre-filled from `profile`.
    pub fn open(kind: ModalKind, profile: &UserProfile) -> Self {
        let fields = match kind {
            ModalKind::EditUser => {
                let avatar = profile
                    .avatar
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                vec![
                    ModalField::text("Username", &profile.username),
                    ModalField::text("Professional title", &profile.professional_title),
                    ModalField::text("Bio", &profile.bio),
                    ModalField::text("Profile picture", &avatar),
                ]
            }
            ModalKind::EditPersonal => vec![
                ModalField::text("Full name", &profile.full_name),
                ModalField::text("Username", &profile.username),
                ModalField::text("Email", &profile.email),
                ModalField::text("Role", &profile.role),
                ModalField::choice("Gender", &GENDERS, &profile.gender),
            ],
        };
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn focused_mut(&mut self) -> Option<&mut ModalField> {
        self.fields.get_mut(self.focus)
    }

    fn value_of(&self, label: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|field| field.label() == label)
            .map(|field| field.value().trim().to_string())
    }

    /// Writes the draft back into `profile`.
    pub fn apply(&self, profile: &mut UserProfile) {
        let set = |target: &mut String, label: &str| {
            if let Some(value) = self.value_of(label) {
                *target = value;
            }
        };

        match self.kind {
            ModalKind::EditUser => {
                set(&mut profile.username, "Username");
                set(&mut profile.professional_title, "Professional title");
                set(&mut profile.bio, "Bio");
                if let Some(path) = self.value_of("Profile picture") {
                    profile.avatar = (!path.is_empty()).then(|| PathBuf::from(path));
                }
            }
            ModalKind::EditPersonal => {
                set(&mut profile.full_name, "Full name");
                set(&mut profile.username, "Username");
                set(&mut profile.email, "Email");
                set(&mut profile.role, "Role");
                set(&mut profile.gender, "Gender");
            }
        }
    }
}
