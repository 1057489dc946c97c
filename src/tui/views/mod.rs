pub mod alert;
pub mod chat;
pub mod debug;
pub mod model_picker;
pub mod path_prompt;
