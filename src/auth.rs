//! Credential checks for administrative endpoints

/// Decides whether a raw `Authorization` header value grants admin access
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, authorization: Option<&str>) -> bool;
}

/// Accepts exactly `Bearer <token>` for one shared token
pub struct StaticBearerToken {
    expected: String,
}

impl StaticBearerToken {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            expected: format!("Bearer {}", token.as_ref()),
        }
    }
}

impl CredentialVerifier for StaticBearerToken {
    fn verify(&self, authorization: Option<&str>) -> bool {
        let Some(presented) = authorization else {
            return false;
        };

        // Compare every byte so timing does not depend on the matching prefix
        let expected = self.expected.as_bytes();
        let presented = presented.as_bytes();
        if expected.len() != presented.len() {
            return false;
        }
        expected
            .iter()
            .zip(presented)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
