/// The reason a datagram failed to parse.
///
/// A datagram rejected with any of these is dropped silently: its header can not be trusted
/// enough to address a report back to its sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The buffer is shorter than the header requires, or shorter than the length the header
    /// declares for the whole datagram.
    #[error("truncated packet")]
    Truncated,

    /// The stored checksum does not match the one computed over the received bytes.
    #[error("checksum error")]
    WrongChecksum,

    /// A registry value (such as an ICMP type) that is not assigned.
    #[error("unrecognized packet")]
    Unrecognized,

    /// The packet was recognized but is self-contradictory.
    ///
    /// Examples: an IPv4 header with a version other than 4, or a declared total length shorter
    /// than the fixed header.
    #[error("malformed packet")]
    Malformed,

    /// The packet uses a feature that this router does not implement.
    ///
    /// IPv4 options and fragmentation are rejected this way, as are ICMP messages of types other
    /// than the ones this router reacts to.
    #[error("unsupported option")]
    Unsupported,
}

/// The result type for parsing of the wire formats.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::Truncated.to_string(), "truncated packet");
        assert_eq!(Error::WrongChecksum.to_string(), "checksum error");
        assert_eq!(Error::Unsupported.to_string(), "unsupported option");
    }
}
