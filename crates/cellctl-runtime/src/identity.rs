//! Identity lookup against the passwd database.

use cellctl_core::domain::{Cell, Identity};
use cellctl_core::ports::{CellError, IdentityResolver};
use nix::unistd::User;
use tracing::{debug, warn};

/// Resolves a cell's identity name through `getpwnam` on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswdIdentityResolver;

impl IdentityResolver for PasswdIdentityResolver {
    fn resolve(&self, cell: &Cell) -> Result<Identity, CellError> {
        let name = cell.identity_name();
        match lookup(name) {
            Ok(Some(identity)) => {
                debug!(user = name, %identity, "resolved cell identity");
                Ok(identity)
            }
            Ok(None) => Err(CellError::UnknownIdentity {
                name: name.to_owned(),
            }),
            Err(e) => {
                warn!(user = name, error = %e, "passwd lookup failed");
                Err(CellError::UnknownIdentity {
                    name: name.to_owned(),
                })
            }
        }
    }
}

/// Look up `name` in the user database.
pub fn lookup(name: &str) -> nix::Result<Option<Identity>> {
    Ok(User::from_name(name)?.map(|user| Identity::new(user.uid.as_raw(), user.gid.as_raw())))
}
