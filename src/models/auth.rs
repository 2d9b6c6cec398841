use crate::core::error::TransitionError;

/// Authentication state of the current visitor.
///
/// Changed only through the transition methods below, so the signed-in
/// email can never disagree with the logged-in flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    SignedOut,
    /// A sign-in, sign-up or session restore is in flight.
    Pending,
    SignedIn {
        uid: String,
        email: String,
    },
    Failed {
        reason: String,
    },
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Email of the signed-in user, or an empty string.
    pub fn email(&self) -> &str {
        match self {
            Self::SignedIn { email, .. } => email,
            _ => "",
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::SignedIn { uid, .. } => Some(uid),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Session label for the navigation bar.
    pub fn display_name(&self) -> String {
        match self {
            Self::SignedIn { email, .. } if !email.is_empty() => email.clone(),
            Self::SignedIn { uid, .. } => uid.clone(),
            Self::Pending => "signing in...".to_string(),
            Self::SignedOut | Self::Failed { .. } => "guest".to_string(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SignedOut => "signed out",
            Self::Pending => "pending",
            Self::SignedIn { .. } => "signed in",
            Self::Failed { .. } => "failed",
        }
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            from: self.label(),
        }
    }

    /// `SignedOut | Failed -> Pending`
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        match self {
            Self::SignedOut | Self::Failed { .. } => {
                *self = Self::Pending;
                Ok(())
            }
            _ => Err(self.reject("begin sign-in")),
        }
    }

    /// `Pending -> SignedIn`
    pub fn complete(&mut self, uid: String, email: String) -> Result<(), TransitionError> {
        match self {
            Self::Pending => {
                *self = Self::SignedIn { uid, email };
                Ok(())
            }
            _ => Err(self.reject("complete sign-in")),
        }
    }

    /// `Pending -> Failed`
    pub fn fail(&mut self, reason: String) -> Result<(), TransitionError> {
        match self {
            Self::Pending => {
                *self = Self::Failed { reason };
                Ok(())
            }
            _ => Err(self.reject("fail sign-in")),
        }
    }

    /// `SignedOut -> SignedIn`, used when a persisted session is found at startup.
    pub fn restore(&mut self, uid: String, email: String) -> Result<(), TransitionError> {
        match self {
            Self::SignedOut => {
                *self = Self::SignedIn { uid, email };
                Ok(())
            }
            _ => Err(self.reject("restore session")),
        }
    }

    /// Any state -> `SignedOut`
    pub fn sign_out(&mut self) {
        *self = Self::SignedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthState {
        AuthState::SignedIn {
            uid: "u1".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_default_is_signed_out() {
        let state = AuthState::default();
        assert_eq!(state, AuthState::SignedOut);
        assert!(!state.is_logged_in());
        assert_eq!(state.email(), "");
        assert_eq!(state.display_name(), "guest");
    }

    #[test]
    fn test_sign_in_flow() {
        let mut state = AuthState::default();
        state.begin().unwrap();
        assert!(state.is_pending());
        assert!(!state.is_logged_in());

        state
            .complete("u1".to_string(), "ada@example.com".to_string())
            .unwrap();
        assert!(state.is_logged_in());
        assert_eq!(state.email(), "ada@example.com");
        assert_eq!(state.uid(), Some("u1"));
    }

    #[test]
    fn test_failed_sign_in_can_retry() {
        let mut state = AuthState::default();
        state.begin().unwrap();
        state.fail("Incorrect email or password.".to_string()).unwrap();
        assert_eq!(state.error(), Some("Incorrect email or password."));
        assert!(!state.is_logged_in());
        assert_eq!(state.email(), "");

        state.begin().unwrap();
        assert!(state.is_pending());
    }

    #[test]
    fn test_illegal_transitions_leave_state_unchanged() {
        let mut state = AuthState::default();
        let err = state.complete("u1".to_string(), "x@y.z".to_string()).unwrap_err();
        assert_eq!(err.from, "signed out");
        assert_eq!(state, AuthState::SignedOut);

        assert!(state.fail("nope".to_string()).is_err());
        assert_eq!(state, AuthState::SignedOut);

        let mut state = signed_in();
        assert!(state.begin().is_err());
        assert!(state.restore("u2".to_string(), "b@c.d".to_string()).is_err());
        assert_eq!(state, signed_in());

        let mut state = AuthState::Pending;
        assert!(state.begin().is_err());
        assert!(state.restore("u2".to_string(), "b@c.d".to_string()).is_err());
        assert!(state.is_pending());
    }

    #[test]
    fn test_restore_and_sign_out() {
        let mut state = AuthState::default();
        state
            .restore("u1".to_string(), "ada@example.com".to_string())
            .unwrap();
        assert_eq!(state, signed_in());

        state.sign_out();
        assert_eq!(state, AuthState::SignedOut);
        assert!(!state.is_logged_in());
        assert_eq!(state.email(), "");

        let mut state = AuthState::Pending;
        state.sign_out();
        assert_eq!(state, AuthState::SignedOut);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(signed_in().display_name(), "ada@example.com");
        assert_eq!(AuthState::Pending.display_name(), "signing in...");
        let no_email = AuthState::SignedIn {
            uid: "u9".to_string(),
            email: String::new(),
        };
        assert_eq!(no_email.display_name(), "u9");
    }
}
