//! The three independent sequenced message streams.

use crate::envelope::MessageType;

/// One logical message channel.
///
/// Each channel is backed by a single file and carries its own sequence
/// counters; by convention exactly one process writes a channel and one
/// reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Unsolicited snapshots pushed by the bridge.
    State,
    /// Action requests written by the controller.
    Actions,
    /// Per-action results written by the bridge.
    Results,
}

impl Channel {
    /// Every channel, in a fixed order usable for table indexing.
    pub const ALL: [Channel; 3] = [Channel::State, Channel::Actions, Channel::Results];

    /// Backing file name inside the transport directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Channel::State => "game_state.json",
            Channel::Actions => "actions.json",
            Channel::Results => "action_results.json",
        }
    }

    /// The envelope message type every record on this channel must carry.
    pub fn message_type(self) -> MessageType {
        match self {
            Channel::State => MessageType::State,
            Channel::Actions => MessageType::ActionRequest,
            Channel::Results => MessageType::ActionResult,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Channel::State => 0,
            Channel::Actions => 1,
            Channel::Results => 2,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}
