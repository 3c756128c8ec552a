// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Configuration of the service.

use demoapi_core::env::get_optional_var;
use derive_getters::Getters;

/// Default port to listen on.
const DEFAULT_PORT: u16 = 3000;

/// Default value of the token that grants access to the admin APIs.
const DEFAULT_ADMIN_TOKEN: &str = "fake-super-secret-token";

/// Options to configure the service.
#[derive(Debug, Getters)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// Port to listen on.  The service only binds to the loopback interface.
    port: u16,

    /// Value that the `X-Token` header must carry in requests to the admin APIs.
    admin_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, admin_token: DEFAULT_ADMIN_TOKEN.to_owned() }
    }
}

impl Config {
    /// Creates a configuration from environment variables whose name is prefixed with the given
    /// `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT` and `<prefix>_ADMIN_TOKEN`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let admin_token = get_optional_var::<String>(prefix, "ADMIN_TOKEN")?
            .unwrap_or_else(|| DEFAULT_ADMIN_TOKEN.to_owned());
        if admin_token.is_empty() {
            return Err(format!("Environment variable {}_ADMIN_TOKEN cannot be empty", prefix));
        }

        Ok(Self {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            admin_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_all_present() {
        let overrides = [("DEMOAPI_PORT", Some("8080")), ("DEMOAPI_ADMIN_TOKEN", Some("s3cr3t"))];
        temp_env::with_vars(overrides, || {
            let config = Config::from_env("DEMOAPI").unwrap();
            assert_eq!(Config { port: 8080, admin_token: "s3cr3t".to_owned() }, config);
        });
    }

    #[test]
    fn test_config_from_env_use_defaults() {
        let overrides = ["DEMOAPI_PORT", "DEMOAPI_ADMIN_TOKEN"];
        temp_env::with_vars_unset(overrides, || {
            let config = Config::from_env("DEMOAPI").unwrap();
            assert_eq!(Config::default(), config);
            assert_eq!(3000, *config.port());
            assert_eq!("fake-super-secret-token", config.admin_token());
        });
    }

    #[test]
    fn test_config_from_env_bad_port() {
        temp_env::with_vars([("DEMOAPI_PORT", Some("http"))], || {
            let err = Config::from_env("DEMOAPI").unwrap_err();
            assert!(err.contains("Invalid type in environment variable DEMOAPI_PORT"));
        });
    }

    #[test]
    fn test_config_from_env_empty_token() {
        let overrides = [("DEMOAPI_PORT", None), ("DEMOAPI_ADMIN_TOKEN", Some(""))];
        temp_env::with_vars(overrides, || {
            let err = Config::from_env("DEMOAPI").unwrap_err();
            assert_eq!("Environment variable DEMOAPI_ADMIN_TOKEN cannot be empty", err);
        });
    }
}
