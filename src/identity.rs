use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in account owning the records it creates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
        }
    }
}

/// Supplies the current user, if any. Record creation is blocked without one.
pub trait Identity {
    fn current_user(&self) -> Option<User>;
}

/// Identity backed by the locally-stored profile. `None` until a profile has
/// been set up, which keeps commit preconditions honest in local use.
#[derive(Debug, Clone, Default)]
pub struct ProfileIdentity {
    profile: Option<User>,
}

impl ProfileIdentity {
    pub fn new(profile: Option<User>) -> Self {
        Self { profile }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            profile: Some(user),
        }
    }
}

impl Identity for ProfileIdentity {
    fn current_user(&self) -> Option<User> {
        self.profile.clone()
    }
}
