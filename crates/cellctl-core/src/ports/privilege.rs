//! Privilege precondition port.

/// Reports whether the controller may assume another identity.
#[cfg_attr(test, mockall::automock)]
pub trait PrivilegeCheck: Send + Sync {
    fn is_elevated(&self) -> bool;
}
