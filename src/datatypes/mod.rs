mod digit_string;
mod numeric_plan_indicator;
mod pdu_type;
mod text_message;
mod type_of_address;
mod type_of_number;
mod validity_period;

pub use digit_string::{DigitString, MAX_DIGITS, validate_digits};
pub use numeric_plan_indicator::NumericPlanIndicator;
pub use pdu_type::{MessageTypeIndicator, PduType, ValidityPeriodFormat};
pub use text_message::{MAX_SEPTETS, TextMessage, validate_text};
pub use type_of_address::TypeOfAddress;
pub use type_of_number::TypeOfNumber;
pub use validity_period::ValidityPeriod;
