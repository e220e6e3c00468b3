use mair_core::base::Address;

use crate::ClaimError;

/// The single privileged principal of a distribution.
///
/// Administratorship is fixed at construction and cannot be transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminControl {
    admin: Address,
}

impl AdminControl {
    /// Create the gate for `admin`.
    #[must_use]
    pub const fn new(admin: Address) -> Self {
        Self { admin }
    }

    /// The administrator address.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Fail unless `caller` is the administrator.
    ///
    /// # Errors
    /// Returns [`ClaimError::Unauthorized`] for any other caller.
    pub fn require_admin(&self, caller: &Address) -> Result<(), ClaimError> {
        if *caller == self.admin {
            Ok(())
        } else {
            Err(ClaimError::Unauthorized { caller: *caller })
        }
    }
}
