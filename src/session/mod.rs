//! Session state and the collaborators it reports through.
//!
//! A [`Session`] holds the loaded punch records, the linking roster, the
//! generator roster and the last generated documents. It talks to the outside
//! world only through the traits in this module: a [`NotificationSink`] for
//! messages, a [`DownloadSink`] for finished documents and a [`Clipboard`]
//! for copied text.

mod load;
mod sink;
mod state;

pub use load::{InputFile, LoadGenerations, LoadTarget, LoadTicket, read_input};
pub use sink::{
    Clipboard, DirectoryDownloadSink, DownloadSink, NotificationSink, RecordingNotifier,
    TracingNotifier, copy_with_fallback,
};
pub use state::{RosterEntry, Session};
