//! Caller identity
//!
//! The transport layer authenticates requests and hands the engine an
//! already-resolved principal. The engine never inspects ambient request
//! state.

/// Authenticated caller of an engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// EV owner, identified by NIC
    Owner(String),
    /// Station operator
    Operator,
    /// Backoffice administrator
    Backoffice,
}

impl Principal {
    /// The owner NIC, if this caller is an EV owner
    pub fn owner_nic(&self) -> Option<&str> {
        match self {
            Self::Owner(nic) => Some(nic),
            _ => None,
        }
    }

    /// Operator or backoffice caller
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Operator | Self::Backoffice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_exposes_nic() {
        let p = Principal::Owner("200012345678".into());
        assert_eq!(p.owner_nic(), Some("200012345678"));
        assert!(!p.is_staff());
    }

    #[test]
    fn staff_roles_have_no_nic() {
        assert_eq!(Principal::Operator.owner_nic(), None);
        assert!(Principal::Operator.is_staff());
        assert!(Principal::Backoffice.is_staff());
    }
}
