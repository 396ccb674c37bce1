pub mod booking;
pub mod lead;
pub mod meter;
pub mod results;
pub mod validation;

pub use booking::{BookingInput, BookingRequest, BookingWindow, TimeSlot};
pub use lead::LeadContext;
pub use meter::{ProtectionLevel, ProtectionMeter};
pub use results::{AchievementTier, QuizResult};
pub use validation::{Field, ValidationErrors};
