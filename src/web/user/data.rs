use serde::Deserialize;

const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub csrf_token: String,
    pub email: String,
    pub user_type: String,
}

impl LoginData {
    pub fn validate(&self) -> bool {
        if self.email.is_empty() || self.email.len() > MAX_EMAIL_LEN {
            return false;
        }
        if !self.email.contains('@') {
            return false;
        }
        if self.user_type.is_empty() || self.user_type.len() > 30 {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, user_type: &str) -> LoginData {
        LoginData {
            csrf_token: "tok".to_string(),
            email: email.to_string(),
            user_type: user_type.to_string(),
        }
    }

    #[test]
    fn accepts_a_plain_employee_login() {
        assert!(login("a@a", "Employee").validate());
    }

    #[test]
    fn rejects_empty_or_mail_less_input() {
        assert!(!login("", "Employee").validate());
        assert!(!login("not-an-email", "Employee").validate());
        assert!(!login("a@a", "").validate());
    }

    #[test]
    fn rejects_oversized_fields() {
        let long_email = format!("{}@a", "a".repeat(MAX_EMAIL_LEN));
        assert!(!login(&long_email, "Employee").validate());
        assert!(!login("a@a", &"x".repeat(31)).validate());
    }
}
