//! Datagrams for the router itself, and the messages it originates.
//!
//! Only ICMP is served locally. Echo requests are answered, any other ICMP message is consumed
//! silently. Datagrams of other protocols are answered with a protocol unreachable error.
//!
//! Every message the router originates goes through [`Router::send_control_message`], which
//! wraps it into a fresh datagram and routes it like a forwarded one. Error messages are built
//! by [`Router::send_error`] following [RFC 792], and never about datagrams that must not be
//! answered according to [RFC 1122].
//!
//! [`Router::send_control_message`]: ../ip/struct.Router.html#method.send_control_message
//! [`Router::send_error`]: ../ip/struct.Router.html#method.send_error
//! [RFC 792]: https://tools.ietf.org/html/rfc792
//! [RFC 1122]: https://tools.ietf.org/html/rfc1122
mod control;
mod dispatch;

pub use dispatch::{Local, Transport};
