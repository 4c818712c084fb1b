//! Form validation. Each check function returns either normalized fields
//! ready for the store or the list of per-field errors to render back into
//! the page.

use serde::Deserialize;

#[derive(Debug, Default)]
pub struct FieldErrors(pub Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Normalized registration data: username and email lowercased.
#[derive(Debug)]
pub struct RegisterFields {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn register(form: &RegisterForm) -> Result<RegisterFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = form.name.trim().to_owned();
    let username = form.username.trim().to_lowercase();
    let email = form.email.trim().to_lowercase();

    if username.is_empty() {
        errors.push("username", "Username is required.");
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.push("username", "Username may only contain letters, digits, _ and -.");
    }

    if !looks_like_email(&email) {
        errors.push("email", "Enter a valid email address.");
    }

    if form.password1.len() < 8 {
        errors.push("password1", "Password must be at least 8 characters.");
    }
    if form.password1 != form.password2 {
        errors.push("password2", "Passwords do not match.");
    }

    if errors.is_empty() {
        Ok(RegisterFields {
            name,
            username,
            email,
            password: form.password1.clone(),
        })
    } else {
        Err(errors)
    }
}

#[derive(Deserialize, Default)]
pub struct RoomForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub description: String,
}

pub struct RoomFields {
    pub name: String,
    pub topic: String,
    pub description: String,
}

pub fn room(form: &RoomForm) -> Result<RoomFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = form.name.trim().to_owned();
    let topic = form.topic.trim().to_owned();

    if name.is_empty() {
        errors.push("name", "Room name is required.");
    }
    if topic.is_empty() {
        errors.push("topic", "Topic is required.");
    }

    if errors.is_empty() {
        Ok(RoomFields {
            name,
            topic,
            description: form.description.trim().to_owned(),
        })
    } else {
        Err(errors)
    }
}

/// Profile update fields, collected from the multipart body by the handler.
#[derive(Default)]
pub struct ProfileForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
}

pub struct ProfileFields {
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
}

pub fn profile(form: &ProfileForm) -> Result<ProfileFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = form.username.trim().to_lowercase();
    let email = form.email.trim().to_lowercase();

    if username.is_empty() {
        errors.push("username", "Username is required.");
    }
    if !looks_like_email(&email) {
        errors.push("email", "Enter a valid email address.");
    }

    if errors.is_empty() {
        Ok(ProfileFields {
            name: form.name.trim().to_owned(),
            username,
            email,
            bio: form.bio.trim().to_owned(),
        })
    } else {
        Err(errors)
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
