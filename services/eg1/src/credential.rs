// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use edgegrid_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for EdgeGrid.
#[derive(Clone)]
pub struct Credential {
    /// Client token, identifies the API client.
    pub client_token: String,
    /// Access token, identifies the grant.
    pub access_token: String,
    /// Client secret, the HMAC key material. Never sent over the wire.
    pub client_secret: String,
}

impl Credential {
    /// Create a new credential, all fields must be non-empty.
    pub fn new(
        client_token: impl Into<String>,
        access_token: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let cred = Self {
            client_token: client_token.into(),
            access_token: access_token.into(),
            client_secret: client_secret.into(),
        };
        cred.check()?;

        Ok(cred)
    }

    /// Check that every field is present.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("client_token", &self.client_token),
            ("access_token", &self.access_token),
            ("client_secret", &self.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::credential_invalid(format!("{name} is empty")));
            }
        }

        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_token", &Redact::from(&self.client_token))
            .field("access_token", &Redact::from(&self.access_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_fields() {
        let err = Credential::new("akab-client", "", "s3cr3t").unwrap_err();
        assert!(err.is_credential_error());
        assert_eq!(err.to_string(), "access_token is empty");

        let err = Credential::new("akab-client", "akab-access", "  ").unwrap_err();
        assert_eq!(err.to_string(), "client_secret is empty");
    }

    #[test]
    fn test_is_valid() {
        let cred = Credential::new("akab-client", "akab-access", "s3cr3t").unwrap();
        assert!(cred.is_valid());

        let mut cred = cred;
        cred.client_token.clear();
        assert!(!cred.is_valid());
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new(
            "akab-client-token-xxx",
            "akab-access-token-yyy",
            "very-secret-client-secret",
        )
        .unwrap();

        let output = format!("{cred:?}");
        assert!(!output.contains("very-secret-client-secret"));
        assert!(output.contains("aka***xxx"));
        assert!(output.contains("ver***ret"));
    }
}
