//! User-facing notifications
//!
//! The UI shows short, static toast messages. Error details are never put
//! into a notification; they go to the log instead.

pub const DEPLOY_SUCCEEDED: &str = "Agent deployed successfully!";
pub const DEPLOY_FAILED: &str = "Failed to deploy agent";
pub const PROFILE_LOAD_FAILED: &str = "Failed to load agent data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

/// Sink for notifications (a toast area, a terminal line, a test recorder)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kinds() {
        let ok = Notification::success(DEPLOY_SUCCEEDED);
        let failed = Notification::error(PROFILE_LOAD_FAILED);

        assert!(!ok.is_error());
        assert!(failed.is_error());
        assert_eq!(ok.message(), "Agent deployed successfully!");
        assert_eq!(failed.message(), "Failed to load agent data");
        assert_ne!(Notification::error(DEPLOY_FAILED), failed);
    }
}
