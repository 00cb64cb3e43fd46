//! Message delivery endpoints and their paths relative to the API root.

use std::fmt;

/// One LINE message delivery mode. Each maps to a fixed path; the payload never affects routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageEndpoint {
    /// Answer a webhook event using its reply token.
    Reply,
    /// Send to one user, group or room.
    Push,
    /// Send to a list of user ids.
    Multicast,
    /// Send to every friend of the bot.
    Broadcast,
    /// Send to an audience or filtered demographic.
    Narrowcast,
}

impl MessageEndpoint {
    pub const ALL: [MessageEndpoint; 5] = [
        MessageEndpoint::Reply,
        MessageEndpoint::Push,
        MessageEndpoint::Multicast,
        MessageEndpoint::Broadcast,
        MessageEndpoint::Narrowcast,
    ];

    pub fn path(self) -> &'static str {
        match self {
            MessageEndpoint::Reply => "/message/reply",
            MessageEndpoint::Push => "/message/push",
            MessageEndpoint::Multicast => "/message/multicast",
            MessageEndpoint::Broadcast => "/message/broadcast",
            MessageEndpoint::Narrowcast => "/message/narrowcast",
        }
    }

    /// Capitalized name used in response logs ("Push").
    pub fn label(self) -> &'static str {
        match self {
            MessageEndpoint::Reply => "Reply",
            MessageEndpoint::Push => "Push",
            MessageEndpoint::Multicast => "Multicast",
            MessageEndpoint::Broadcast => "Broadcast",
            MessageEndpoint::Narrowcast => "Narrowcast",
        }
    }

    /// Lowercase name used in error logs ("push").
    pub fn name(self) -> &'static str {
        match self {
            MessageEndpoint::Reply => "reply",
            MessageEndpoint::Push => "push",
            MessageEndpoint::Multicast => "multicast",
            MessageEndpoint::Broadcast => "broadcast",
            MessageEndpoint::Narrowcast => "narrowcast",
        }
    }
}

impl fmt::Display for MessageEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_match_messaging_api() {
        assert_eq!(MessageEndpoint::Reply.path(), "/message/reply");
        assert_eq!(MessageEndpoint::Push.path(), "/message/push");
        assert_eq!(MessageEndpoint::Multicast.path(), "/message/multicast");
        assert_eq!(MessageEndpoint::Broadcast.path(), "/message/broadcast");
        assert_eq!(MessageEndpoint::Narrowcast.path(), "/message/narrowcast");
    }

    #[test]
    fn paths_are_distinct() {
        let paths: HashSet<_> = MessageEndpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), MessageEndpoint::ALL.len());
    }

    #[test]
    fn path_ends_with_name() {
        for e in MessageEndpoint::ALL {
            assert!(e.path().ends_with(e.name()));
            assert!(e.label().eq_ignore_ascii_case(e.name()));
            assert_eq!(e.to_string(), e.name());
        }
    }
}
