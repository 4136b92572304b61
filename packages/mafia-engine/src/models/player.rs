use serde::{Deserialize, Serialize};

use super::role::RoleKind;
use crate::utils::text::fold_name;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: RoleKind,
}

impl Player {
    pub fn new(name: impl Into<String>, role: RoleKind) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// A seat counts as filled once it has both a name and a role.
    pub fn is_seated(&self) -> bool {
        !self.name.trim().is_empty() && self.role != RoleKind::Unassigned
    }

    pub fn is_named(&self, name: &str) -> bool {
        fold_name(&self.name) == fold_name(name)
    }
}
