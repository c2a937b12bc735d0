//! Content hashing using blake3.
//!
//! The digest is what binds a url to its content: same bytes, same digest.

use std::io::{self, Read};

/// Read buffer size for streaming hashes.
const BUFFER_SIZE: usize = 64 * 1024;

/// Opaque content fingerprint.
///
/// Digests computed by this crate are 256-bit blake3 outputs. Digests handed
/// in by collaborators (e.g. an asset that already knows its hash) may have
/// any length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(Box<[u8]>);

impl ContentDigest {
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering, as embedded in urls.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex (either case). `None` on odd length or non-hex input.
    pub fn from_hex(s: &str) -> Option<Self> {
        hex::decode(s).ok().map(Self::from_bytes)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash in-memory content.
pub fn hash_bytes<T: AsRef<[u8]> + ?Sized>(data: &T) -> ContentDigest {
    let hash = blake3::hash(data.as_ref());
    ContentDigest::from_bytes(*hash.as_bytes())
}

/// Hash a stream to its end, in stream order.
///
/// I/O failures are returned to the caller, never folded into a digest.
pub fn hash_reader(mut reader: impl Read) -> io::Result<ContentDigest> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ContentDigest::from_bytes(*hasher.finalize().as_bytes()))
}
