//! Schedule query core.
//!
//! Three stages answer "what departs this stop on this date":
//! resolution (which services run), assembly (the stop time / trip /
//! route join for those services at one stop) and sequencing (ordering
//! plus spacing). All three are read-only over an injected store.

mod assembler;
mod resolver;
mod sequencer;


pub use assembler::{DepartureCandidate, ScheduleAssembler, ScheduleError};
pub use resolver::CalendarResolver;
pub use sequencer::{Departure, sequence};
