use crate::{check_cellphone, check_password_complexity, check_username, ValidationError};

/// A registered QuickChat account. Credentials are compared in the clear;
/// the simulator runs offline and never shares them.
#[derive(Debug, Clone)]
pub struct Account {
    username: String,
    password: String,
    cellphone: String,
    first_name: String,
    last_name: String,
}

impl Account {
    pub fn new(
        username: String,
        password: String,
        cellphone: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            username,
            password,
            cellphone,
            first_name,
            last_name,
        }
    }

    /// Validate username, password and cellphone in that order, returning the
    /// first failure or the captured-confirmation string.
    pub fn register(&self) -> Result<String, ValidationError> {
        if !check_username(&self.username) {
            return Err(ValidationError::BadUsername);
        }
        if !check_password_complexity(&self.password) {
            return Err(ValidationError::BadPassword);
        }
        if !check_cellphone(&self.cellphone) {
            return Err(ValidationError::BadCellphone);
        }
        Ok("Username and password successfully captured.\nCell phone number successfully added."
            .to_string())
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn login_status_message(&self, logged_in: bool) -> String {
        if logged_in {
            format!(
                "Welcome {} {}, it is great to see you again.",
                self.first_name, self.last_name
            )
        } else {
            "Username or password incorrect, please try again.".to_string()
        }
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_cellphone(&self) -> &str {
        &self.cellphone
    }

    pub fn get_first_name(&self) -> &str {
        &self.first_name
    }

    pub fn get_last_name(&self) -> &str {
        &self.last_name
    }
}
