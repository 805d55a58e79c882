//! Tunables of the router.

/// Time to live of datagrams this router originates.
pub const DEFAULT_HOP_LIMIT: u8 = 64;

/// Number of datagrams buffered per unresolved next hop.
pub const DEFAULT_PENDING_CAPACITY: usize = 16;

/// Open configuration of a [`Router`].
///
/// ```rust
/// use ipforward::Config;
///
/// let config = Config::default()
///     .originate_hop_limit(255)
///     .deny_echo(true);
/// assert_eq!(config.originate_hop_limit, 255);
/// assert!(config.report_errors);
/// ```
///
/// [`Router`]: layer/ip/struct.Router.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// The time to live of every echo reply and error message the router originates.
    ///
    /// Never copied from the datagram that caused the message.
    pub originate_hop_limit: u8,

    /// Silently ignore echo requests addressed to the router.
    pub deny_echo: bool,

    /// Answer forwarding failures and unsupported local protocols with ICMP errors.
    ///
    /// When unset, these datagrams are dropped without a word.
    pub report_errors: bool,
}

impl Config {
    /// Set the time to live of originated datagrams.
    pub fn originate_hop_limit(self, originate_hop_limit: u8) -> Self {
        Config { originate_hop_limit, ..self }
    }

    /// Choose whether echo requests are ignored.
    pub fn deny_echo(self, deny_echo: bool) -> Self {
        Config { deny_echo, ..self }
    }

    /// Choose whether failures are reported with ICMP errors.
    pub fn report_errors(self, report_errors: bool) -> Self {
        Config { report_errors, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            originate_hop_limit: DEFAULT_HOP_LIMIT,
            deny_echo: false,
            report_errors: true,
        }
    }
}
