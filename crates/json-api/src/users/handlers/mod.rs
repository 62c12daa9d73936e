//! User Handlers

pub(crate) mod details;
pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod set_as_admin;
pub(crate) mod update_password;
