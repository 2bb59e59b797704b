pub mod issue_card;
pub mod status;
pub mod text_input;
