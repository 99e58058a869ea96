use crate::inscription_id::InscriptionId;
use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter};

/// A stable 32-byte identifier for an object created inside the store,
/// derived from the inscription that created it plus a small discriminant
/// so an inscription that creates more than one object (a parent object
/// plus a named child, for instance) doesn't collide.
///
/// Real object systems of this shape (Move/Sui-style stores) derive
/// object ids from a transaction digest plus a creation-local counter;
/// this engine has no consensus-critical need for that derivation to be
/// anything but stable and collision-resistant, so it hashes the
/// inscription id and discriminant with SHA-256 rather than reimplementing
/// a consensus hash.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectID(pub [u8; 32]);

impl ObjectID {
    pub fn derive(inscription_id: InscriptionId, discriminant: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(inscription_id.value());
        hasher.update(discriminant.to_le_bytes());
        ObjectID(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        ObjectID(bytes)
    }
}

impl Display for ObjectID {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
