use serde::{Deserialize, Serialize};

/// Identity is resolved outside the engine; accounts arrive as opaque ids
/// plus a role tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Guest,
    Host,
    Admin,
    Anonymous,
}

/// The acting account, passed explicitly into every gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: AccountId,
    pub role: Role,
}

impl Caller {
    pub fn new(id: AccountId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn anonymous() -> Self {
        Self {
            id: AccountId(0),
            role: Role::Anonymous,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
