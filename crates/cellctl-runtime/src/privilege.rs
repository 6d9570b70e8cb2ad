//! Privilege check backed by the effective uid.

use cellctl_core::ports::PrivilegeCheck;
use nix::unistd::Uid;

/// Elevated means running with an effective uid of 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct EffectiveUserPrivileges;

impl PrivilegeCheck for EffectiveUserPrivileges {
    fn is_elevated(&self) -> bool {
        Uid::effective().is_root()
    }
}
