mod message;
mod trim_actor;

use crossbeam_channel::{Receiver, Sender};
pub use message::VideoOutcome;
pub use trim_actor::TrimActor;

use crate::result::Result;

/// A worker that consumes messages from a receive channel and produces
/// messages on a send channel until the input side closes.
pub trait Actor<From, To> {
    fn set_receive_channel(&mut self, channel: Receiver<From>);

    fn set_send_channel(&mut self, channel: Sender<To>);

    fn run(self) -> Result<()>;
}
