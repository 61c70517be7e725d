//! Owner and group name resolution

use crate::{Error, Result};
use nix::unistd::{Group, User, getegid, geteuid};

/// Access to the user and group databases.
///
/// The resolver only ever needs names for the current process and numeric
/// ids for names, so that is all this exposes.
pub trait IdentityResolver {
    /// Name of the effective user of this process.
    fn current_user(&self) -> Result<String>;

    /// Name of the effective group of this process.
    fn current_group(&self) -> Result<String>;

    /// Numeric uid for a user name.
    fn uid_for(&self, name: &str) -> Result<u32>;

    /// Numeric gid for a group name.
    fn gid_for(&self, name: &str) -> Result<u32>;
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn current_user(&self) -> Result<String> {
        (**self).current_user()
    }

    fn current_group(&self) -> Result<String> {
        (**self).current_group()
    }

    fn uid_for(&self, name: &str) -> Result<u32> {
        (**self).uid_for(name)
    }

    fn gid_for(&self, name: &str) -> Result<u32> {
        (**self).gid_for(name)
    }
}

/// The operating system's passwd and group databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

fn lookup_failed(err: nix::Error) -> Error {
    Error::IdentityLookup {
        message: err.to_string(),
    }
}

impl IdentityResolver for SystemIdentity {
    fn current_user(&self) -> Result<String> {
        let uid = geteuid();
        User::from_uid(uid)
            .map_err(lookup_failed)?
            .map(|user| user.name)
            .ok_or_else(|| Error::UnknownUser {
                name: uid.to_string(),
            })
    }

    fn current_group(&self) -> Result<String> {
        let gid = getegid();
        Group::from_gid(gid)
            .map_err(lookup_failed)?
            .map(|group| group.name)
            .ok_or_else(|| Error::UnknownGroup {
                name: gid.to_string(),
            })
    }

    fn uid_for(&self, name: &str) -> Result<u32> {
        User::from_name(name)
            .map_err(lookup_failed)?
            .map(|user| user.uid.as_raw())
            .ok_or_else(|| Error::UnknownUser {
                name: name.to_string(),
            })
    }

    fn gid_for(&self, name: &str) -> Result<u32> {
        Group::from_name(name)
            .map_err(lookup_failed)?
            .map(|group| group.gid.as_raw())
            .ok_or_else(|| Error::UnknownGroup {
                name: name.to_string(),
            })
    }
}
