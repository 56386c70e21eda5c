pub mod embed;
pub mod error;
pub mod settings;
pub mod validator;
