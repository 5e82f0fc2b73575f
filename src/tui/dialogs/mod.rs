pub mod event_form;
pub mod delete_confirmation;
pub mod help;
