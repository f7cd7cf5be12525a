use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ClientError, ClientResult};

/// Shared online/offline flag.
///
/// The host application flips it from its network monitor; operations that
/// must not run offline check it before touching the backend.
#[derive(Debug, Clone)]
pub struct Connectivity {
    online: Arc<AtomicBool>,
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub fn set_online(&self, online: bool) {
        let was = self.online.swap(online, Ordering::AcqRel);
        if was != online {
            tracing::info!(online, "Connectivity changed");
        }
    }

    /// Fail with [`ClientError::Offline`] naming `action` when offline.
    pub fn ensure_online(&self, action: &'static str) -> ClientResult<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(ClientError::Offline(action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn clones_share_the_flag() {
        let a = Connectivity::default();
        let b = a.clone();
        assert!(b.is_online());
        a.set_online(false);
        assert!(!b.is_online());
        assert_matches!(
            b.ensure_online("delete surveys"),
            Err(ClientError::Offline("delete surveys"))
        );
        a.set_online(true);
        assert!(b.ensure_online("delete surveys").is_ok());
    }
}
