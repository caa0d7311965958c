//! Optional embedding inside a chat client's mini-app container.
//!
//! When a host is present it is told the app is ready and asked to expand to
//! full height. Without one, or when the host refuses, the app simply runs
//! standalone.

use anyhow::Result;

use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

pub trait MiniAppHost {
    fn name(&self) -> &str;
    /// Signals that the first screen can be shown.
    fn ready(&self) -> Result<()>;
    /// Requests the full-height viewport.
    fn expand(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostStatus {
    Standalone,
    Embedded { host: String, expanded: bool },
}

impl HostStatus {
    pub fn is_embedded(&self) -> bool {
        matches!(self, HostStatus::Embedded { .. })
    }
}

pub fn attach_host(host: Option<&dyn MiniAppHost>) -> HostStatus {
    let Some(host) = host else {
        return HostStatus::Standalone;
    };

    if let Err(err) = host.ready() {
        log_warn!("{} did not accept ready signal, running standalone: {err:#}", host.name());
        return HostStatus::Standalone;
    }

    let expanded = match host.expand() {
        Ok(()) => true,
        Err(err) => {
            log_warn!("{} refused to expand: {err:#}", host.name());
            false
        }
    };
    log_info!("Attached to {} (expanded: {expanded})", host.name());

    HostStatus::Embedded {
        host: host.name().to_string(),
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        calls: RefCell<Vec<&'static str>>,
        fail_ready: bool,
        fail_expand: bool,
    }

    impl MiniAppHost for RecordingHost {
        fn name(&self) -> &str {
            "test host"
        }

        fn ready(&self) -> Result<()> {
            self.calls.borrow_mut().push("ready");
            if self.fail_ready {
                anyhow::bail!("not embedded");
            }
            Ok(())
        }

        fn expand(&self) -> Result<()> {
            self.calls.borrow_mut().push("expand");
            if self.fail_expand {
                anyhow::bail!("viewport locked");
            }
            Ok(())
        }
    }

    #[test]
    fn no_host_is_standalone() {
        assert_eq!(attach_host(None), HostStatus::Standalone);
    }

    #[test]
    fn ready_then_expand() {
        let host = RecordingHost::default();
        let status = attach_host(Some(&host));
        assert_eq!(*host.calls.borrow(), ["ready", "expand"]);
        assert_eq!(
            status,
            HostStatus::Embedded {
                host: "test host".into(),
                expanded: true
            }
        );
    }

    #[test]
    fn refused_ready_falls_back_to_standalone() {
        let host = RecordingHost {
            fail_ready: true,
            ..Default::default()
        };
        assert_eq!(attach_host(Some(&host)), HostStatus::Standalone);
        assert_eq!(*host.calls.borrow(), ["ready"]);
    }

    #[test]
    fn refused_expand_stays_embedded() {
        let host = RecordingHost {
            fail_expand: true,
            ..Default::default()
        };
        let status = attach_host(Some(&host));
        assert!(status.is_embedded());
        assert_eq!(
            status,
            HostStatus::Embedded {
                host: "test host".into(),
                expanded: false
            }
        );
    }
}
