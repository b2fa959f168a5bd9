use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Login payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload. `terms` is always sent as accepted; the server
/// rejects the request otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub terms: bool,
}

/// Successful login/registration response.
///
/// The server has shipped both `token` and `access_token` spellings; accept
/// either.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_token_field() {
        let auth: AuthResponse =
            serde_json::from_str(r#"{"token": "abc", "user": {"id": 1, "name": "Lea"}}"#)
                .unwrap();
        assert_eq!(auth.token, "abc");
        assert_eq!(auth.user.unwrap().name, "Lea");
    }

    #[test]
    fn test_auth_response_access_token_alias() {
        let auth: AuthResponse =
            serde_json::from_str(r#"{"access_token": "xyz"}"#).unwrap();
        assert_eq!(auth.token, "xyz");
        assert!(auth.user.is_none());
    }
}
