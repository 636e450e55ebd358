pub mod harness;
pub mod test_protocol;

pub use harness::TestPair;
pub use test_protocol::{protocol, Label, MoveCommand, Position, Velocity};
