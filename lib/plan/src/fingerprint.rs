use md5::{Digest, Md5};
use rdf_fragments_model::NamedNode;
use std::fmt::{Display, Formatter};

/// The content-derived identity of a search tree.
///
/// The fingerprint is the hex-encoded MD5 digest of the ordered seed list. Every seed is prefixed
/// with its byte length, so concatenations of different seed lists cannot collide. The order of
/// the seeds is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeFingerprint(String);

impl TreeFingerprint {
    /// Computes the fingerprint of `seeds`.
    pub fn from_seeds<'a>(seeds: impl IntoIterator<Item = &'a NamedNode>) -> Self {
        let mut hasher = Md5::new();
        for seed in seeds {
            let bytes = seed.as_str().as_bytes();
            hasher.update((bytes.len() as u64).to_be_bytes());
            hasher.update(bytes);
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TreeFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
