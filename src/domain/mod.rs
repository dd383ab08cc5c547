pub mod channel;
pub mod item;
pub mod result;

pub use channel::ChannelInfo;
pub use item::{ContentItem, ViewSource};
pub use result::{ChannelReport, Derived, ScrapeFailure, ScrapeResult, Totals};
