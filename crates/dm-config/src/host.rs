//! Host identity providers
//!
//! Profile selection compares the runtime hostname against each profile's
//! `HOSTNAME`. The provider is a trait so tests and tools can pin the host.

use crate::{Error, Result};

/// Supplies the hostname used for environment profile selection.
pub trait HostIdentity {
    fn hostname(&self) -> Result<String>;
}

/// The operating system's hostname.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostIdentity for SystemHost {
    fn hostname(&self) -> Result<String> {
        let name = hostname::get().map_err(|e| Error::HostIdentityUnavailable {
            message: e.to_string(),
        })?;
        let name = name
            .into_string()
            .map_err(|raw| Error::HostIdentityUnavailable {
                message: format!("hostname is not valid UTF-8: {raw:?}"),
            })?;

        if name.trim().is_empty() {
            return Err(Error::HostIdentityUnavailable {
                message: "hostname is empty".into(),
            });
        }
        Ok(name.trim().to_string())
    }
}

/// A fixed hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost(pub String);

impl StaticHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl HostIdentity for StaticHost {
    fn hostname(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_host_returns_its_name() {
        assert_eq!(StaticHost::new("srv1").hostname().unwrap(), "srv1");
    }

    #[test]
    fn system_host_matches_os_hostname() {
        let expected = hostname::get().unwrap().into_string().unwrap();
        match SystemHost.hostname() {
            Ok(name) => assert_eq!(name, expected.trim()),
            Err(e) => {
                assert!(expected.trim().is_empty(), "unexpected error: {e}");
                assert!(matches!(e, Error::HostIdentityUnavailable { .. }));
            }
        }
    }
}
