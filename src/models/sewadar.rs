use serde::Serialize;

/// A volunteer on the roster.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Sewadar {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,       // ⇔ sewadars.avatar (data: URL, ≤200px long edge)
    pub phone_number: Option<String>, // ⇔ sewadars.phone_number
}

/// Payload for a roster insert. Only the name is mandatory.
#[derive(Debug, Clone, Default)]
pub struct NewSewadar {
    pub name: String,
    pub phone_number: Option<String>,
}

/// Partial update of a roster entry: `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct SewadarUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
}

impl SewadarUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none() && self.phone_number.is_none()
    }
}

impl Sewadar {
    pub fn apply(&mut self, update: &SewadarUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(avatar) = &update.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(phone) = &update.phone_number {
            self.phone_number = Some(phone.clone());
        }
    }

    /// Case- and whitespace-insensitive name comparison key.
    pub fn name_key(name: &str) -> String {
        name.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
