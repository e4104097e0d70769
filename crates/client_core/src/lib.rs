pub mod coerce;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod reconciler;
pub mod slot_store;
pub mod transport;

pub use controller::{ControllerEvent, FeederController, FeederView};
pub use dispatcher::{Notice, NoticeLevel, NoticeSurface};
pub use slot_store::{SlotDraft, SlotRow, SlotStore};
pub use transport::{FeederApi, HttpFeederApi};
