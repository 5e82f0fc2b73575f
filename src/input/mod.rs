pub mod normal_mode;
pub mod insert_mode;
pub mod command_mode;
pub mod form_input;

pub use form_input::FormInput;
