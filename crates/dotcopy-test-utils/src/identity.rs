//! [`SandboxIdentity`] stand-in for the system user and group database.

use crate::TestTree;
use dotcopy_core::{Error, IdentityResolver, Result};
use dotcopy_fs::Ownership;

/// Identity database that knows exactly one user and one group, both mapped
/// to the ids of the test process so chown always succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SandboxIdentity {
    pub owner: Ownership,
}

impl SandboxIdentity {
    pub const USER: &'static str = "tester";
    pub const GROUP: &'static str = "testers";

    pub fn new(owner: Ownership) -> Self {
        Self { owner }
    }

    /// Identity owning the sandbox of `tree`.
    pub fn for_tree(tree: &TestTree) -> Self {
        Self::new(tree.owner())
    }
}

impl IdentityResolver for SandboxIdentity {
    fn current_user(&self) -> Result<String> {
        Ok(Self::USER.to_string())
    }

    fn current_group(&self) -> Result<String> {
        Ok(Self::GROUP.to_string())
    }

    fn uid_for(&self, name: &str) -> Result<u32> {
        if name == Self::USER {
            Ok(self.owner.uid)
        } else {
            Err(Error::UnknownUser {
                name: name.to_string(),
            })
        }
    }

    fn gid_for(&self, name: &str) -> Result<u32> {
        if name == Self::GROUP {
            Ok(self.owner.gid)
        } else {
            Err(Error::UnknownGroup {
                name: name.to_string(),
            })
        }
    }
}
