use std::fmt;

/// Named capabilities checked at the entry of every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// List records
    View,

    /// Read a single record
    Show,

    /// Create records
    Create,

    /// Modify records, including their media
    Update,

    /// Remove records
    Delete,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::View => "view",
            Capability::Show => "show",
            Capability::Create => "create",
            Capability::Update => "update",
            Capability::Delete => "delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource families a capability applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Chat,
    EBazaar,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Chat => "chat",
            Resource::EBazaar => "ebazaar",
        }
    }

    /// Capabilities every authenticated user holds on this resource.
    pub fn default_grants(&self) -> &'static [Capability] {
        match self {
            // Members read rooms and post into them.
            Resource::Chat => &[Capability::View, Capability::Show, Capability::Create],
            Resource::EBazaar => &[Capability::View, Capability::Show],
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
