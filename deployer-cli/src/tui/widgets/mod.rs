pub mod input_field;
pub mod spinner;

pub use input_field::InputField;
pub use spinner::Spinner;
