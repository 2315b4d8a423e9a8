//! The quorum network command taxonomy.

use std::fmt;

/// Who is allowed to originate a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandAccess {
    /// Reachable by any connected client (subject to node policy) as well as
    /// service nodes. Only blink submission needs this.
    PublicIngress,
    /// Only authenticated service nodes may send this command.
    QuorumOnly,
}

/// Every command carried on the quorum network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Blink tx submission / quorum-internal forward.
    Blink,
    /// Blink signature batch relay between quorum members.
    BlinkSign,
    /// Entry point → submitter: the tx never started verification.
    BlNostart,
    /// Entry point → submitter: the quorum rejected the tx.
    BlBad,
    /// Entry point → submitter: the quorum approved the tx.
    BlGood,
    /// Quorum vote gossip (checkpoints, obligations).
    Vote,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Blink,
        Command::BlinkSign,
        Command::BlNostart,
        Command::BlBad,
        Command::BlGood,
        Command::Vote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Blink => "blink",
            Command::BlinkSign => "blink_sign",
            Command::BlNostart => "bl_nostart",
            Command::BlBad => "bl_bad",
            Command::BlGood => "bl_good",
            Command::Vote => "vote",
        }
    }

    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "blink" => Some(Command::Blink),
            "blink_sign" => Some(Command::BlinkSign),
            "bl_nostart" => Some(Command::BlNostart),
            "bl_bad" => Some(Command::BlBad),
            "bl_good" => Some(Command::BlGood),
            "vote" => Some(Command::Vote),
            _ => None,
        }
    }

    pub fn access(self) -> CommandAccess {
        match self {
            Command::Blink => CommandAccess::PublicIngress,
            _ => CommandAccess::QuorumOnly,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
